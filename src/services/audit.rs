//! Relationship invariant audit

use std::collections::{HashMap, HashSet};

use crate::models::{Author, Book, CatalogSnapshot, Publication, Violation};

/// Report every broken mirror, publication, dangling and duplicate entry.
/// An empty result means the catalog is consistent.
pub fn audit(snapshot: &CatalogSnapshot) -> Vec<Violation> {
    let books: HashMap<&str, &Book> = snapshot.books.iter().map(|b| (b.isbn.as_str(), b)).collect();
    let authors: HashMap<i32, &Author> = snapshot.authors.iter().map(|a| (a.id, a)).collect();
    let publications: HashMap<i32, &Publication> =
        snapshot.publications.iter().map(|p| (p.id, p)).collect();

    let mut violations = Vec::new();

    for book in &snapshot.books {
        let owner = format!("book {}", book.isbn);
        duplicates(&owner, &book.authors, "author", &mut violations);

        for author_id in unique(&book.authors) {
            match authors.get(author_id) {
                None => violations.push(Violation::Dangling {
                    owner: owner.clone(),
                    reference: format!("author {}", author_id),
                }),
                Some(author) if !author.books.contains(&book.isbn) => {
                    violations.push(Violation::AuthorMirror {
                        isbn: book.isbn.clone(),
                        author_id: *author_id,
                    })
                }
                Some(_) => {}
            }
        }

        if let Some(publication_id) = book.publication {
            match publications.get(&publication_id) {
                None => violations.push(Violation::Dangling {
                    owner: owner.clone(),
                    reference: format!("publication {}", publication_id),
                }),
                Some(publication) if !publication.books.contains(&book.isbn) => {
                    violations.push(Violation::PublicationMirror {
                        isbn: book.isbn.clone(),
                        publication_id,
                    })
                }
                Some(_) => {}
            }
        }
    }

    for author in &snapshot.authors {
        let owner = format!("author {}", author.id);
        duplicates(&owner, &author.books, "book", &mut violations);

        for isbn in unique(&author.books) {
            match books.get(isbn.as_str()) {
                None => violations.push(Violation::Dangling {
                    owner: owner.clone(),
                    reference: format!("book {}", isbn),
                }),
                Some(book) if !book.authors.contains(&author.id) => {
                    violations.push(Violation::BookMirror {
                        author_id: author.id,
                        isbn: isbn.clone(),
                    })
                }
                Some(_) => {}
            }
        }
    }

    for publication in &snapshot.publications {
        let owner = format!("publication {}", publication.id);
        duplicates(&owner, &publication.books, "book", &mut violations);

        for isbn in unique(&publication.books) {
            match books.get(isbn.as_str()) {
                None => violations.push(Violation::Dangling {
                    owner: owner.clone(),
                    reference: format!("book {}", isbn),
                }),
                Some(book) if book.publication != Some(publication.id) => {
                    violations.push(Violation::PublicationMembership {
                        publication_id: publication.id,
                        isbn: isbn.clone(),
                    })
                }
                Some(_) => {}
            }
        }
    }

    violations
}

/// First occurrence of each entry, in order
fn unique<T: Eq + std::hash::Hash>(items: &[T]) -> impl Iterator<Item = &T> {
    let mut seen = HashSet::new();
    items.iter().filter(move |item| seen.insert(*item))
}

fn duplicates<T>(owner: &str, items: &[T], kind: &str, violations: &mut Vec<Violation>)
where
    T: Eq + std::hash::Hash + std::fmt::Display,
{
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for item in items {
        if !seen.insert(item) && reported.insert(item) {
            violations.push(Violation::Duplicate {
                owner: owner.to_string(),
                reference: format!("{} {}", kind, item),
            });
        }
    }
}
