/*
[INPUT]:  CoinAPI streaming data-type vocabulary
[OUTPUT]: Typed data-type enum with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use std::fmt;

use serde::{Serialize, Serializer};

/// Data type requested in the stream `hello` handshake
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    Trade,
    Book,
    Heartbeat,
    /// Any other type name the service accepts (`quote`, `book20`, `ohlcv`, ...)
    Other(String),
}

impl DataType {
    pub fn as_str(&self) -> &str {
        match self {
            DataType::Trade => "trade",
            DataType::Book => "book",
            DataType::Heartbeat => "heartbeat",
            DataType::Other(name) => name,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for DataType {
    fn from(value: &str) -> Self {
        match value {
            "trade" => DataType::Trade,
            "book" => DataType::Book,
            "heartbeat" => DataType::Heartbeat,
            other => DataType::Other(other.to_string()),
        }
    }
}

impl Serialize for DataType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
