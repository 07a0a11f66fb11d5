//! Catalog operations: load, add, remove, search, PDF retrieval.
//!
//! Every operation takes a [`RequestScope`]. Reads follow the scope's
//! target user; writes require an owner scope and always target the
//! owner's own catalog. The whole-file mutation pattern is load, change
//! in memory, rewrite, with no isolation between concurrent requests.

use std::sync::Arc;

use tracing::{info, warn};

use libris_store::{BlobStore, CatalogStore};
use libris_types::{Book, BookId, RequestScope, SearchField, Username};

use crate::error::{OpsError, OpsResult};

/// A PDF file received with an add-book request.
#[derive(Clone, Debug)]
pub struct PdfUpload {
    /// The upload's original file name; blobs are stored under it, so a
    /// same-named re-upload overwrites the previous file.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Input for [`Library::add_book`].
#[derive(Clone, Debug, Default)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub year: String,
    pub genre: String,
    pub pdf: Option<PdfUpload>,
}

/// Catalog operations over a catalog store and a blob store.
pub struct Library {
    catalogs: Arc<dyn CatalogStore>,
    blobs: Arc<dyn BlobStore>,
}

impl Library {
    pub fn new(catalogs: Arc<dyn CatalogStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { catalogs, blobs }
    }

    /// Load the catalog visible to the scope.
    ///
    /// Shared and owner scopes read through the same path, so a shared
    /// view of user X is record-for-record identical to X's own view.
    /// An unknown target (including the default `guest`) is an empty
    /// catalog, not an error.
    pub fn load(&self, scope: &RequestScope) -> OpsResult<Vec<Book>> {
        Ok(self.catalogs.load(scope.target())?)
    }

    /// Append a record to the owner's catalog, storing its PDF first if
    /// one was uploaded.
    ///
    /// There is no duplicate-title rejection: identical calls append
    /// identical records. Returns the stored record.
    pub fn add_book(&self, scope: &RequestScope, new: NewBook) -> OpsResult<Book> {
        let owner = scope.writer().ok_or(OpsError::ReadOnlyScope)?;

        let pdf_path = match new.pdf {
            Some(upload) => Some(self.store_pdf(owner, upload)?),
            None => None,
        };

        let mut book = Book::new(new.title, new.author, new.year, new.genre);
        book.pdf_path = pdf_path;

        let mut catalog = self.catalogs.load(owner)?;
        catalog.push(book.clone());
        self.catalogs.save(owner, &catalog)?;

        info!(user = %owner, title = %book.title, "book added");
        Ok(book)
    }

    fn store_pdf(&self, owner: &Username, upload: PdfUpload) -> OpsResult<String> {
        // Extension filtering only, as at upload time in the UI; the
        // bytes themselves are not inspected.
        if !upload.file_name.to_lowercase().ends_with(".pdf") {
            return Err(OpsError::PdfOnly(upload.file_name));
        }
        Ok(self.blobs.store(owner, &upload.file_name, &upload.bytes)?)
    }

    /// Remove every record whose title matches case-insensitively.
    ///
    /// Returns the number of records removed; zero matches is a valid
    /// outcome, not an error. The catalog is only rewritten when
    /// something was removed. Blob files referenced by removed records
    /// are left in place, orphaned.
    pub fn remove_book(&self, scope: &RequestScope, title: &str) -> OpsResult<usize> {
        let owner = scope.writer().ok_or(OpsError::ReadOnlyScope)?;

        let catalog = self.catalogs.load(owner)?;
        let kept: Vec<Book> = catalog
            .iter()
            .filter(|book| !book.title_matches(title))
            .cloned()
            .collect();

        let removed = catalog.len() - kept.len();
        if removed > 0 {
            self.catalogs.save(owner, &kept)?;
            info!(user = %owner, title, removed, "books removed");
        } else {
            warn!(user = %owner, title, "remove matched no records");
        }
        Ok(removed)
    }

    /// Retrieve the PDF bytes for a record in the scoped catalog.
    ///
    /// Works in both owner and shared scopes: shared viewers can
    /// download any PDF the catalog references. A stale `pdf_path`
    /// surfaces here as a store `FileNotFound`, not at catalog load.
    pub fn open_pdf(&self, scope: &RequestScope, id: BookId) -> OpsResult<Vec<u8>> {
        let catalog = self.catalogs.load(scope.target())?;
        let book = catalog
            .iter()
            .find(|book| book.id() == id)
            .ok_or(OpsError::BookNotFound(id))?;
        let path = book.pdf_path.as_deref().ok_or(OpsError::NoPdf)?;
        Ok(self.blobs.retrieve(path)?)
    }
}

/// Filter records where `field` contains `term` as a case-insensitive
/// substring, preserving relative order. Pure: the input is untouched.
pub fn search(catalog: &[Book], term: &str, field: SearchField) -> Vec<Book> {
    let term = term.to_lowercase();
    catalog
        .iter()
        .filter(|book| book.field(field).to_lowercase().contains(&term))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use libris_store::{MemLibrary, StoreError};

    fn library(store: &Arc<MemLibrary>) -> Library {
        Library::new(store.clone(), store.clone())
    }

    fn owner(name: &str) -> RequestScope {
        RequestScope::owner(Username::new(name).unwrap())
    }

    fn shared(name: &str) -> RequestScope {
        RequestScope::shared(Some(Username::new(name).unwrap()))
    }

    fn new_book(title: &str, author: &str) -> NewBook {
        NewBook {
            title: title.into(),
            author: author.into(),
            year: "1965".into(),
            genre: "Science Fiction".into(),
            pdf: None,
        }
    }

    #[test]
    fn add_appends_to_the_end() {
        let store = Arc::new(MemLibrary::new());
        let lib = library(&store);
        let alice = owner("alice");

        lib.add_book(&alice, new_book("Dune", "Frank Herbert")).unwrap();
        lib.add_book(&alice, new_book("Emma", "Jane Austen")).unwrap();

        let catalog = lib.load(&alice).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.last().unwrap().title, "Emma");
    }

    #[test]
    fn identical_adds_append_two_records() {
        let store = Arc::new(MemLibrary::new());
        let lib = library(&store);
        let alice = owner("alice");

        lib.add_book(&alice, new_book("Dune", "Frank Herbert")).unwrap();
        lib.add_book(&alice, new_book("Dune", "Frank Herbert")).unwrap();

        assert_eq!(lib.load(&alice).unwrap().len(), 2);
    }

    #[test]
    fn add_with_pdf_stores_blob_and_path() {
        let store = Arc::new(MemLibrary::new());
        let lib = library(&store);
        let alice = owner("alice");

        let mut new = new_book("Dune", "Frank Herbert");
        new.pdf = Some(PdfUpload {
            file_name: "dune.pdf".into(),
            bytes: b"%PDF-1.4".to_vec(),
        });
        let book = lib.add_book(&alice, new).unwrap();

        assert_eq!(book.pdf_path.as_deref(), Some("alice/pdfs/dune.pdf"));
        assert_eq!(
            BlobStore::retrieve(store.as_ref(), "alice/pdfs/dune.pdf").unwrap(),
            b"%PDF-1.4"
        );
    }

    #[test]
    fn add_rejects_non_pdf_upload() {
        let store = Arc::new(MemLibrary::new());
        let lib = library(&store);

        let mut new = new_book("Dune", "Frank Herbert");
        new.pdf = Some(PdfUpload {
            file_name: "dune.epub".into(),
            bytes: vec![1, 2, 3],
        });
        let err = lib.add_book(&owner("alice"), new).unwrap_err();
        assert!(matches!(err, OpsError::PdfOnly(_)));
    }

    #[test]
    fn shared_scope_cannot_mutate() {
        let store = Arc::new(MemLibrary::new());
        let lib = library(&store);

        let err = lib
            .add_book(&shared("alice"), new_book("Dune", "Frank Herbert"))
            .unwrap_err();
        assert!(matches!(err, OpsError::ReadOnlyScope));

        let err = lib.remove_book(&shared("alice"), "Dune").unwrap_err();
        assert!(matches!(err, OpsError::ReadOnlyScope));
    }

    #[test]
    fn remove_deletes_all_case_insensitive_matches() {
        let store = Arc::new(MemLibrary::new());
        let lib = library(&store);
        let alice = owner("alice");

        lib.add_book(&alice, new_book("Dune", "Frank Herbert")).unwrap();
        lib.add_book(&alice, new_book("DUNE", "Someone Else")).unwrap();
        lib.add_book(&alice, new_book("Emma", "Jane Austen")).unwrap();

        assert_eq!(lib.remove_book(&alice, "dune").unwrap(), 2);
        let catalog = lib.load(&alice).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].title, "Emma");
    }

    #[test]
    fn remove_with_no_match_reports_zero() {
        let store = Arc::new(MemLibrary::new());
        let lib = library(&store);
        let alice = owner("alice");

        lib.add_book(&alice, new_book("Emma", "Jane Austen")).unwrap();
        assert_eq!(lib.remove_book(&alice, "Dune").unwrap(), 0);
        assert_eq!(lib.remove_book(&alice, "Dune").unwrap(), 0);
        assert_eq!(lib.load(&alice).unwrap().len(), 1);
    }

    #[test]
    fn remove_orphans_the_blob() {
        let store = Arc::new(MemLibrary::new());
        let lib = library(&store);
        let alice = owner("alice");

        let mut new = new_book("Dune", "Frank Herbert");
        new.pdf = Some(PdfUpload {
            file_name: "dune.pdf".into(),
            bytes: b"%PDF-1.4".to_vec(),
        });
        lib.add_book(&alice, new).unwrap();

        assert_eq!(lib.remove_book(&alice, "Dune").unwrap(), 1);
        // The blob outlives its record.
        assert!(BlobStore::retrieve(store.as_ref(), "alice/pdfs/dune.pdf").is_ok());
    }

    #[test]
    fn shared_load_equals_owner_load() {
        let store = Arc::new(MemLibrary::new());
        let lib = library(&store);
        let alice = owner("alice");

        lib.add_book(&alice, new_book("Dune", "Frank Herbert")).unwrap();
        lib.add_book(&alice, new_book("Emma", "Jane Austen")).unwrap();

        assert_eq!(
            lib.load(&shared("alice")).unwrap(),
            lib.load(&alice).unwrap()
        );
    }

    #[test]
    fn unknown_shared_target_loads_empty() {
        let store = Arc::new(MemLibrary::new());
        let lib = library(&store);
        assert!(lib.load(&RequestScope::shared(None)).unwrap().is_empty());
    }

    #[test]
    fn search_filters_by_substring_preserving_order() {
        let catalog = vec![
            Book::new("Dune", "Frank Herbert", "1965", "Science Fiction"),
            Book::new("The Smith Saga", "John Smith", "1990", "Fantasy"),
            Book::new("Forge", "Anna Smithson", "2001", "Drama"),
        ];

        let hits = search(&catalog, "smith", SearchField::Author);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].author, "John Smith");
        assert_eq!(hits[1].author, "Anna Smithson");
        // Input untouched.
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn search_by_each_field() {
        let catalog = vec![Book::new("Dune", "Frank Herbert", "1965", "Science Fiction")];
        assert_eq!(search(&catalog, "dUNe", SearchField::Title).len(), 1);
        assert_eq!(search(&catalog, "196", SearchField::Year).len(), 1);
        assert_eq!(search(&catalog, "science", SearchField::Genre).len(), 1);
        assert_eq!(search(&catalog, "tolkien", SearchField::Author).len(), 0);
    }

    #[test]
    fn open_pdf_roundtrip_and_failures() {
        let store = Arc::new(MemLibrary::new());
        let lib = library(&store);
        let alice = owner("alice");

        let mut new = new_book("Dune", "Frank Herbert");
        new.pdf = Some(PdfUpload {
            file_name: "dune.pdf".into(),
            bytes: b"%PDF-1.4".to_vec(),
        });
        let with_pdf = lib.add_book(&alice, new).unwrap();
        let without_pdf = lib.add_book(&alice, new_book("Emma", "Jane Austen")).unwrap();

        assert_eq!(lib.open_pdf(&alice, with_pdf.id()).unwrap(), b"%PDF-1.4");
        // Shared viewers can download referenced PDFs too.
        assert_eq!(
            lib.open_pdf(&shared("alice"), with_pdf.id()).unwrap(),
            b"%PDF-1.4"
        );

        assert!(matches!(
            lib.open_pdf(&alice, without_pdf.id()),
            Err(OpsError::NoPdf)
        ));

        let ghost = Book::new("Ghost", "Nobody", "0", "None");
        assert!(matches!(
            lib.open_pdf(&alice, ghost.id()),
            Err(OpsError::BookNotFound(_))
        ));
    }

    #[test]
    fn stale_pdf_path_surfaces_at_retrieval() {
        let store = Arc::new(MemLibrary::new());
        let lib = library(&store);
        let alice = owner("alice");

        // A record pointing at a blob that was never stored: the catalog
        // loads fine, retrieval fails.
        let mut book = Book::new("Dune", "Frank Herbert", "1965", "Science Fiction");
        book.pdf_path = Some("alice/pdfs/gone.pdf".into());
        CatalogStore::save(store.as_ref(), &Username::new("alice").unwrap(), &[book.clone()])
            .unwrap();

        assert_eq!(lib.load(&alice).unwrap().len(), 1);
        assert!(matches!(
            lib.open_pdf(&alice, book.id()),
            Err(OpsError::Store(StoreError::FileNotFound(_)))
        ));
    }
}
