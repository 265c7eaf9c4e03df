//! Async client for the [api.video] hosting platform.
//!
//! api.video hosts, encodes, and serves videos and livestreams over a JSON
//! HTTP API. This crate wraps that API: you hand a [`Client`] your API key,
//! and it takes care of exchanging the key for a short-lived bearer token,
//! renewing the token when it expires, splitting large video files into
//! `Content-Range` chunks on upload, and turning error responses into a
//! typed [`Error`].
//!
//! Each resource gets its own service, reached through an accessor on the
//! client: [`Client::videos`], [`Client::livestreams`], [`Client::captions`],
//! [`Client::chapters`], [`Client::players`], [`Client::statistics`],
//! [`Client::account`], and [`Client::upload_tokens`].
//!
//! ```no_run
//! use apivideo::{Client, videos::VideoRequest};
//!
//! # async fn example() -> Result<(), apivideo::Error> {
//! let client = Client::sandbox("YOUR_API_KEY")?;
//!
//! let video = client
//!     .videos()
//!     .create(&VideoRequest {
//!         title: Some("My first video".into()),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! client
//!     .videos()
//!     .upload(&video.video_id, "/path/to/video.mp4")
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! Uploads of files larger than the configured chunk size (128 MiB unless
//! changed through [`ClientBuilder::chunk_size`]) are sent as sequential
//! ranged requests, so arbitrarily large files upload without being held in
//! memory at once.
//!
//! [api.video]: https://docs.api.video/

pub mod account;
pub mod captions;
pub mod chapters;
mod client;
mod credentials;
mod error;
pub mod livestreams;
pub mod players;
pub mod statistics;
mod types;
mod upload;
pub mod upload_tokens;
pub mod videos;

pub use client::{Client, ClientBuilder, Environment};
pub use error::Error;
pub use types::{Link, Pagination, SortBy, SortOrder};
pub use upload::DEFAULT_CHUNK_SIZE;
