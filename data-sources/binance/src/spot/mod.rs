use core::fmt;
use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::{error::Error, protocol::Response};

use self::candle::{Candle, CandlesQuery};

pub mod candle;

pub async fn fetch<Q, R>(api_host: Url, path: &str, query: Q) -> Result<R, Error>
where
    Q: Serialize + fmt::Debug,
    R: DeserializeOwned,
{
    let mut url = api_host.join(path)?;
    let qs = serde_qs::to_string(&query)?;

    info!(?query, ?qs, "Run query");

    url.set_query(Some(&qs));
    let response = reqwest::Client::new().get(url).send().await?;
    let status = response.status();
    let result = response.text().await?;

    debug!(%status, bytes = result.len(), "Got response");
    decode(status, result)
}

fn decode<R: DeserializeOwned>(status: StatusCode, result: String) -> Result<R, Error> {
    match serde_json::from_str::<Response<R>>(&result) {
        Ok(Response::Error { code, msg }) => Err(Error::Api { code, msg }),
        Ok(Response::Success(_)) | Err(_) if !status.is_success() => Err(Error::Status(status)),
        Ok(Response::Success(t)) => Ok(t),
        Err(e) => Err(Error::SerdeError(e, result)),
    }
}

pub async fn fetch_candles(api_host: Url, candles_query: CandlesQuery) -> Result<Vec<Candle>, Error> {
    fetch(api_host, "/api/v3/klines", candles_query).await
}

#[cfg(test)]
mod tests {
    use super::*;

    const KLINES: &str = r#"[
        [1700000000000, "35000.10", "35100.00", "34950.00", "35050.55", "12.5", 1700000059999],
        [1700000060000, "35050.55", "35060.00", "35000.00", "35010.00", "3.25", 1700000119999]
    ]"#;

    #[test]
    fn decode_success() {
        let candles: Vec<Candle> = decode(StatusCode::OK, KLINES.to_string()).unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[1].open_time, 1700000060000);
        assert_eq!(candles[1].volume, 3.25);
    }

    #[test]
    fn decode_empty_array() {
        let candles: Vec<Candle> = decode(StatusCode::OK, "[]".to_string()).unwrap();
        assert!(candles.is_empty());
    }

    #[test]
    fn decode_api_error() {
        let body = r#"{"code":-1120,"msg":"Invalid interval."}"#.to_string();
        let err = decode::<Vec<Candle>>(StatusCode::BAD_REQUEST, body).unwrap_err();
        assert!(matches!(err, Error::Api { code: -1120, .. }));
    }

    #[test]
    fn decode_bad_status() {
        let err = decode::<Vec<Candle>>(StatusCode::BAD_GATEWAY, "<html></html>".to_string())
            .unwrap_err();
        assert!(matches!(err, Error::Status(StatusCode::BAD_GATEWAY)));

        let err = decode::<Vec<Candle>>(StatusCode::SERVICE_UNAVAILABLE, KLINES.to_string())
            .unwrap_err();
        assert!(matches!(err, Error::Status(StatusCode::SERVICE_UNAVAILABLE)));
    }

    #[test]
    fn decode_garbage() {
        let err = decode::<Vec<Candle>>(StatusCode::OK, "not json".to_string()).unwrap_err();
        let Error::SerdeError(_, body) = err else {
            panic!("expected serde error, got {err}");
        };
        assert_eq!(body, "not json");
    }
}
