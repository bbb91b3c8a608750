pub use futures::{channel::mpsc, future::BoxFuture, FutureExt, SinkExt, StreamExt};

pub mod chart_view;
pub mod request;
pub mod shell;
pub mod surface;
pub mod ticker;
pub mod viewport;
pub mod worker;

#[cfg(test)]
mod testing;
