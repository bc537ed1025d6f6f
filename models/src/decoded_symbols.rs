use serde::{Deserialize, Serialize};

/// Payloads read from an image, in the order the recognizer reported them.
///
/// An empty sequence means the image was readable but held no QR symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecodedSymbols(Vec<String>);

impl DecodedSymbols {
    pub fn new(payloads: Vec<String>) -> Self {
        Self(payloads)
    }

    /// The payload surfaced to the user.
    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for DecodedSymbols {
    fn from(payloads: Vec<String>) -> Self {
        Self(payloads)
    }
}
