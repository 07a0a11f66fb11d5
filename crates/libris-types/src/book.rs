use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A catalogued book record.
///
/// This is the unit of persistence: a user's catalog is an ordered list of
/// these records, serialized verbatim to `library.json`. There is no
/// persisted identifier and no uniqueness constraint; two identical
/// records are two entries. `year` is free text, not validated as numeric.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub year: String,
    pub genre: String,
    /// Root-relative path to the uploaded PDF, if one was attached.
    /// Never re-validated against the blob directory on read; a stale
    /// path surfaces as a retrieval failure, not a load failure.
    #[serde(default)]
    pub pdf_path: Option<String>,
}

impl Book {
    /// Create a record with no attached PDF.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: impl Into<String>,
        genre: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year: year.into(),
            genre: genre.into(),
            pdf_path: None,
        }
    }

    /// The content-derived identifier for this record.
    pub fn id(&self) -> BookId {
        BookId::of(self)
    }

    /// The value of the given search field.
    pub fn field(&self, field: SearchField) -> &str {
        match field {
            SearchField::Title => &self.title,
            SearchField::Author => &self.author,
            SearchField::Genre => &self.genre,
            SearchField::Year => &self.year,
        }
    }

    /// Case-insensitive exact title match (the removal key).
    pub fn title_matches(&self, title: &str) -> bool {
        self.title.to_lowercase() == title.to_lowercase()
    }
}

/// Content-derived identifier for a [`Book`].
///
/// A `BookId` is a domain-separated BLAKE3 hash over the record's
/// fields. The same record always produces the same id, so the id is
/// stable across catalog reordering. Byte-identical duplicate records
/// share an id, since the catalog has no persisted identifier to tell
/// them apart.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookId {
    hash: [u8; 32],
}

const BOOK_ID_DOMAIN: &[u8] = b"libris-book-v1:";

impl BookId {
    /// Derive the id for a record.
    pub fn of(book: &Book) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(BOOK_ID_DOMAIN);
        for part in [&book.title, &book.author, &book.year, &book.genre] {
            hasher.update(part.as_bytes());
            hasher.update(b"\0");
        }
        // Tag the optional path so "no PDF" and "empty path" differ.
        match &book.pdf_path {
            Some(path) => {
                hasher.update(b"pdf:");
                hasher.update(path.as_bytes());
            }
            None => {
                hasher.update(b"none");
            }
        }
        Self {
            hash: *hasher.finalize().as_bytes(),
        }
    }

    /// The raw 32-byte hash.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.hash
    }

    /// Full hex-encoded string (64 characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.hash)
    }

    /// Parse from a hex string (64 hex characters).
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let bytes = hex::decode(s).map_err(|_| TypeError::InvalidHex(s.to_string()))?;
        let hash: [u8; 32] = bytes
            .try_into()
            .map_err(|_| TypeError::InvalidHex(s.to_string()))?;
        Ok(Self { hash })
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BookId({})", &self.to_hex()[..8])
    }
}

impl Serialize for BookId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for BookId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Which record field a search matches against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    Title,
    Author,
    Genre,
    Year,
}

impl FromStr for SearchField {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "author" => Ok(Self::Author),
            "genre" => Ok(Self::Genre),
            "year" => Ok(Self::Year),
            other => Err(TypeError::UnknownSearchField(other.to_string())),
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title => write!(f, "title"),
            Self::Author => write!(f, "author"),
            Self::Genre => write!(f, "genre"),
            Self::Year => write!(f, "year"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Book {
        Book::new("Dune", "Frank Herbert", "1965", "Science Fiction")
    }

    #[test]
    fn serialized_shape_is_pinned() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "Dune",
                "author": "Frank Herbert",
                "year": "1965",
                "genre": "Science Fiction",
                "pdf_path": null,
            })
        );
    }

    #[test]
    fn pdf_path_defaults_when_absent() {
        let book: Book = serde_json::from_str(
            r#"{"title":"t","author":"a","year":"y","genre":"g"}"#,
        )
        .unwrap();
        assert_eq!(book.pdf_path, None);
    }

    #[test]
    fn id_is_deterministic() {
        assert_eq!(sample().id(), sample().id());
    }

    #[test]
    fn id_changes_with_content() {
        let mut other = sample();
        other.pdf_path = Some("alice/pdfs/dune.pdf".into());
        assert_ne!(sample().id(), other.id());
    }

    #[test]
    fn id_hex_roundtrip() {
        let id = sample().id();
        assert_eq!(BookId::from_hex(&id.to_hex()).unwrap(), id);
        assert!(BookId::from_hex("not hex").is_err());
        assert!(BookId::from_hex("abcd").is_err());
    }

    #[test]
    fn title_match_is_case_insensitive() {
        assert!(sample().title_matches("dune"));
        assert!(sample().title_matches("DUNE"));
        assert!(!sample().title_matches("dune messiah"));
    }

    #[test]
    fn search_field_parsing() {
        assert_eq!("Author".parse::<SearchField>().unwrap(), SearchField::Author);
        assert_eq!("title".parse::<SearchField>().unwrap(), SearchField::Title);
        assert!(matches!(
            "isbn".parse::<SearchField>(),
            Err(TypeError::UnknownSearchField(_))
        ));
    }

    #[test]
    fn field_accessor() {
        let book = sample();
        assert_eq!(book.field(SearchField::Author), "Frank Herbert");
        assert_eq!(book.field(SearchField::Year), "1965");
    }
}
