use serde::{Deserialize, Serialize};

use crate::import::{CanvasImport, MarkdownImport, import_canvas, import_markdown};
use crate::page::Page;

/// An import job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Request {
    Markdown(MarkdownImport),
    Canvas(CanvasImport),
}

impl Request {
    pub fn path(&self) -> &str {
        match self {
            Self::Markdown(r) => &r.path,
            Self::Canvas(r) => &r.path,
        }
    }
}

/// The outcome of one job. Canvas imports also answer with a `markdown`
/// page record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Response {
    Markdown { page: Box<Page> },
    Error { message: String },
}

impl Response {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    pub fn page(&self) -> Option<&Page> {
        match self {
            Self::Markdown { page } => Some(page),
            Self::Error { .. } => None,
        }
    }
}

/// Run one job to completion. Never panics on bad input; failures become
/// [`Response::Error`].
pub fn handle(request: Request) -> Response {
    let result = match &request {
        Request::Markdown(r) => import_markdown(r),
        Request::Canvas(r) => import_canvas(r),
    };

    result.map(|page| Response::Markdown { page: Box::new(page) }).unwrap_or_else(|err| {
        tracing::warn!(path = %request.path(), error = %err, "import failed");
        Response::Error { message: err.to_string() }
    })
}
