//! Browser-side HTTP plumbing: the backend client, the barcode fetcher,
//! and the client-side download helper.

pub mod api;
pub mod barcode;
pub mod download;
