/*
[INPUT]:  API key from caller or environment
[OUTPUT]: Credential shared by REST and stream clients
[POS]:    Auth layer - module wiring
[UPDATE]: When credential handling changes
*/

pub mod api_key;

pub use api_key::{API_KEY_ENV, API_KEY_HEADER, ApiKey};
