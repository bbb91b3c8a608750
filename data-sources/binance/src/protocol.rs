use serde::Deserialize;

/// Every REST endpoint answers either with its payload or with an error object.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum Response<T> {
    Success(T),
    Error { code: i64, msg: String },
}

#[cfg(test)]
mod test {
    use super::Response;

    #[test]
    fn error_object() {
        let raw_msg = r#"{"code":-1120,"msg":"Invalid interval."}"#;

        let response: Response<Vec<u64>> = serde_json::from_str(raw_msg).unwrap();
        let Response::Error { code, msg } = response else {
            panic!("nope");
        };

        assert_eq!(code, -1120);
        assert_eq!(msg, "Invalid interval.");
    }

    #[test]
    fn payload() {
        let response: Response<Vec<u64>> = serde_json::from_str("[1, 2]").unwrap();
        assert!(matches!(response, Response::Success(v) if v == vec![1, 2]));
    }
}
