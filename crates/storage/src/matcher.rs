//! Native filter evaluation and sorting
//!
//! Predicate semantics follow the usual document store conventions:
//! - Comparisons only match values of the same type class (see
//!   `Value::compare`); `Int` and `Float` share the numeric class
//! - A missing field behaves as `Null`
//! - When a field holds an array, a predicate matches if the whole array or
//!   any single element satisfies it; every predicate on the field is tested
//!   independently
//! - Regex predicates only match strings

use std::cmp::Ordering;

use regex_lite::Regex;

use kindstore_core::{DocFilter, Document, Error, Predicate, Result, SortDirection, SortField, Value};

#[derive(Debug, Clone, Copy)]
enum Comparison {
    Eq,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl Comparison {
    fn accepts(self, ord: Ordering) -> bool {
        match self {
            Comparison::Eq => ord == Ordering::Equal,
            Comparison::Lt => ord == Ordering::Less,
            Comparison::Lte => ord != Ordering::Greater,
            Comparison::Gt => ord == Ordering::Greater,
            Comparison::Gte => ord != Ordering::Less,
        }
    }
}

#[derive(Debug)]
enum CompiledPredicate {
    Compare(Comparison, Value),
    Pattern(Regex),
}

impl CompiledPredicate {
    fn test(&self, value: &Value) -> bool {
        match self {
            CompiledPredicate::Compare(cmp, operand) => {
                value.same_class(operand) && cmp.accepts(value.compare(operand))
            }
            CompiledPredicate::Pattern(re) => value.as_str().map_or(false, |s| re.is_match(s)),
        }
    }

    fn matches(&self, value: Option<&Value>) -> bool {
        let value = value.unwrap_or(&Value::Null);
        if self.test(value) {
            return true;
        }
        match value {
            Value::Array(items) => items.iter().any(|item| self.test(item)),
            _ => false,
        }
    }
}

/// A `DocFilter` with its patterns compiled, ready to test documents
#[derive(Debug)]
pub struct CompiledFilter {
    clauses: Vec<(String, Vec<CompiledPredicate>)>,
}

impl CompiledFilter {
    /// Compile a filter
    ///
    /// # Errors
    ///
    /// Returns a storage error if a regex predicate does not compile.
    pub fn compile(filter: &DocFilter) -> Result<Self> {
        let mut clauses = Vec::new();
        for (path, predicates) in filter.iter() {
            let compiled = predicates
                .iter()
                .map(|p| {
                    Ok(match p {
                        Predicate::Eq(v) => CompiledPredicate::Compare(Comparison::Eq, v.clone()),
                        Predicate::Lt(v) => CompiledPredicate::Compare(Comparison::Lt, v.clone()),
                        Predicate::Lte(v) => CompiledPredicate::Compare(Comparison::Lte, v.clone()),
                        Predicate::Gt(v) => CompiledPredicate::Compare(Comparison::Gt, v.clone()),
                        Predicate::Gte(v) => CompiledPredicate::Compare(Comparison::Gte, v.clone()),
                        Predicate::Regex(pattern) => CompiledPredicate::Pattern(
                            Regex::new(pattern).map_err(|e| {
                                Error::storage(format!("invalid pattern {:?}: {}", pattern, e))
                            })?,
                        ),
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            clauses.push((path.clone(), compiled));
        }
        Ok(Self { clauses })
    }

    /// Check whether a document satisfies every predicate
    pub fn matches(&self, doc: &Document) -> bool {
        self.clauses.iter().all(|(path, predicates)| {
            let value = doc.resolve(path);
            predicates.iter().all(|p| p.matches(value.as_ref()))
        })
    }
}

/// Stable sort of documents by the given columns; missing values sort as `Null`
pub fn sort_documents(docs: Vec<Document>, sort: &[SortField]) -> Vec<Document> {
    if sort.is_empty() {
        return docs;
    }
    let mut keyed: Vec<(Vec<Value>, Document)> = docs
        .into_iter()
        .map(|doc| {
            let keys = sort
                .iter()
                .map(|f| doc.resolve(&f.path).unwrap_or(Value::Null))
                .collect();
            (keys, doc)
        })
        .collect();

    keyed.sort_by(|(a, _), (b, _)| {
        for ((left, right), field) in a.iter().zip(b.iter()).zip(sort) {
            let ord = left.compare(right);
            let ord = match field.direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    });

    keyed.into_iter().map(|(_, doc)| doc).collect()
}
