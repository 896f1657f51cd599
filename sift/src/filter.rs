//! Public translation entry points.
//!
//! Numeric and date fields render to SQL; string, object and array fields
//! render to a filter document. The choice follows from the declared type.

use serde::Serialize;

use crate::config::Config;
use crate::emit::{Document, DocumentEmitter, SqlEmitter, SqlPredicate};
use crate::intent::PredicateIntent;
use crate::request::{DeclaredType, FilterRequest};
use crate::translate::intents as translate_intents;
use crate::Result;

/// Backend a declared type is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Sql,
    Document,
}

impl Backend {
    pub fn for_type(declared_type: DeclaredType) -> Self {
        if declared_type.is_ordered() {
            Backend::Sql
        } else {
            Backend::Document
        }
    }
}

/// A rendered predicate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Predicate {
    Sql(SqlPredicate),
    Document(Document),
}

impl Predicate {
    /// True when the predicate constrains nothing (no raw values were given).
    pub fn is_noop(&self) -> bool {
        match self {
            Predicate::Sql(sql) => sql.is_empty(),
            Predicate::Document(doc) => doc.is_empty(),
        }
    }

    pub fn as_sql(&self) -> Option<&SqlPredicate> {
        match self {
            Predicate::Sql(sql) => Some(sql),
            Predicate::Document(_) => None,
        }
    }

    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Predicate::Document(doc) => Some(doc),
            Predicate::Sql(_) => None,
        }
    }
}

/// Stateless translator carrying its options.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    config: Config,
}

impl Translator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Translate a request into backend-neutral intents.
    pub fn intents(&self, request: &FilterRequest) -> Result<Vec<PredicateIntent>> {
        request.check_field()?;
        let intents = translate_intents(request, &self.config)?;
        tracing::debug!(
            field = %request.field,
            declared_type = %request.declared_type,
            values = request.raw_values.len(),
            intents = intents.len(),
            "translated filter"
        );
        Ok(intents)
    }

    /// Translate a request and render it for its type's backend.
    pub fn translate(&self, request: &FilterRequest) -> Result<Predicate> {
        let intents = self.intents(request)?;
        self.render(Backend::for_type(request.declared_type), &intents)
    }

    /// Render intents for a given backend.
    pub fn render(&self, backend: Backend, intents: &[PredicateIntent]) -> Result<Predicate> {
        match backend {
            Backend::Sql => Ok(Predicate::Sql(self.sql_emitter().emit_all(intents)?)),
            Backend::Document => Ok(Predicate::Document(self.document_emitter().emit_all(intents))),
        }
    }

    fn sql_emitter(&self) -> SqlEmitter<'_> {
        match self.config.table_alias.as_deref() {
            Some(alias) => SqlEmitter::with_alias(alias),
            None => SqlEmitter::new(),
        }
    }

    fn document_emitter(&self) -> DocumentEmitter {
        DocumentEmitter::new(self.config.escape_patterns)
    }
}

/// Translate one field's tokens with the default configuration.
pub fn translate<S: AsRef<str>>(
    field: &str,
    declared_type: DeclaredType,
    raw_values: &[S],
) -> Result<Predicate> {
    let request = FilterRequest::new(
        field,
        declared_type,
        raw_values.iter().map(|v| AsRef::<str>::as_ref(v)),
    );
    Translator::default().translate(&request)
}

/// SQL and document predicates for several fields, all conjoined.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompositePredicate {
    pub sql: SqlPredicate,
    pub document: Document,
}

impl CompositePredicate {
    pub fn is_noop(&self) -> bool {
        self.sql.is_empty() && self.document.is_empty()
    }
}

/// Collects per-field requests and builds one composite predicate.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    translator: Translator,
    requests: Vec<FilterRequest>,
}

impl FilterSet {
    pub fn new(translator: Translator) -> Self {
        Self {
            translator,
            requests: Vec::new(),
        }
    }

    pub fn push(&mut self, request: FilterRequest) -> &mut Self {
        self.requests.push(request);
        self
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Translate every request in insertion order.
    pub fn build(&self) -> Result<CompositePredicate> {
        let mut composite = CompositePredicate::default();
        for request in &self.requests {
            match self.translator.translate(request)? {
                Predicate::Sql(sql) => composite.sql = std::mem::take(&mut composite.sql).and(sql),
                Predicate::Document(doc) => crate::emit::merge(&mut composite.document, doc),
            }
        }
        Ok(composite)
    }
}
