//! Identifier, URI and download-location syntax.

use crate::model::{Document, ElementKind, SpdxElementIndex};
use regex::Regex;
use std::sync::LazyLock;

static SPDX_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^SPDXRef-[\da-zA-Z.\-]+$").expect("static regex"));

pub(crate) static DOCUMENT_REF_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^DocumentRef-[\da-zA-Z.+\-]+$").expect("static regex"));

pub(crate) static LICENSE_REF_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^LicenseRef-[\da-zA-Z.\-]+$").expect("static regex"));

static URI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:[^\s#]+$").expect("static regex"));

static URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?|ftp)://[^\s/$.?#][^\s]*$").expect("static regex")
});

static DOWNLOAD_LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    let url = r"(http://www\.|https://www\.|http://|https://|ssh://|git://|svn://|sftp://|ftp://)?([\w\-.!~*'()%;:&=+$,]+@)?[a-z0-9]+([\-.][a-z0-9]+)*\.[a-z]{2,5}(:[0-9]{1,5})?(/.*)?";
    let git = r"(git\+git@[a-zA-Z0-9.\-]+:[a-zA-Z0-9/\\.@\-]+)";
    let bazaar = r"(bzr\+lp:[a-zA-Z0-9.\-]+)";
    Regex::new(&format!(r"^((((git|hg|svn|bzr)\+)?{url})|{git}|{bazaar})$"))
        .expect("static regex")
});

/// How far an id must resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpdxIdScope {
    /// Only the syntax is checked.
    Syntax,
    /// The id must name the document or one of its packages, files or snippets.
    Document,
    /// The id must name one of the document's files.
    Files,
}

#[must_use]
pub fn is_valid_spdx_id_syntax(spdx_id: &str) -> bool {
    SPDX_ID.is_match(spdx_id)
}

/// Absolute URI without a fragment.
#[must_use]
pub fn is_valid_uri(uri: &str) -> bool {
    URI.is_match(uri)
}

#[must_use]
pub fn is_valid_url(url: &str) -> bool {
    URL.is_match(url)
}

#[must_use]
pub fn is_valid_download_location(location: &str) -> bool {
    DOWNLOAD_LOCATION.is_match(location)
}

pub(crate) fn uri_message(uri: &str) -> String {
    format!(
        "must be a valid URI specified in RFC-3986 and must contain no fragment (#), but is: {uri}"
    )
}

/// Checks an id's syntax and, depending on `scope`, that it resolves.
///
/// Ids of the form `DocumentRef-X:SPDXRef-Y` resolve when `DocumentRef-X`
/// is declared in the creation info.
#[must_use]
pub fn validate_spdx_id(spdx_id: &str, document: &Document, scope: SpdxIdScope) -> Vec<String> {
    let index = SpdxElementIndex::build(document);
    validate_spdx_id_indexed(spdx_id, document, &index, scope)
}

pub(crate) fn validate_spdx_id_indexed(
    spdx_id: &str,
    document: &Document,
    index: &SpdxElementIndex,
    scope: SpdxIdScope,
) -> Vec<String> {
    let mut messages = Vec::new();
    let parts: Vec<&str> = spdx_id.split(':').collect();

    if parts.len() > 2 {
        messages.push(format!(
            "spdx_id must not contain more than one colon in order to separate the external document reference id from the internal SPDX id, but is: {spdx_id}"
        ));
        return messages;
    }

    if let [document_ref, local_id] = parts.as_slice() {
        if !DOCUMENT_REF_ID.is_match(document_ref) {
            messages.push(format!(
                "the external document reference part of spdx_id must only contain letters, numbers, \".\", \"-\" and \"+\" and must begin with \"DocumentRef-\", but is: {document_ref}"
            ));
        }
        if !is_valid_spdx_id_syntax(local_id) {
            messages.push(format!(
                "the internal SPDX id part of spdx_id must only contain letters, numbers, \".\" and \"-\" and must begin with \"SPDXRef-\", but is: {local_id}"
            ));
        }
        if scope != SpdxIdScope::Syntax
            && document
                .creation_info
                .external_document_ref(document_ref)
                .is_none()
        {
            messages.push(format!(
                "did not find the external document reference \"{document_ref}\" in the SPDX document"
            ));
        }
        return messages;
    }

    if !is_valid_spdx_id_syntax(spdx_id) {
        messages.push(format!(
            "spdx_id must only contain letters, numbers, \".\" and \"-\" and must begin with \"SPDXRef-\", but is: {spdx_id}"
        ));
    }
    match scope {
        SpdxIdScope::Syntax => {}
        SpdxIdScope::Document => {
            if !index.contains(spdx_id) {
                messages.push(format!(
                    "did not find the referenced spdx_id {spdx_id} in the SPDX document"
                ));
            }
        }
        SpdxIdScope::Files => {
            if index.kind_of(spdx_id) != Some(ElementKind::File) {
                messages.push(format!(
                    "did not find the referenced spdx_id {spdx_id} in the SPDX document's files"
                ));
            }
        }
    }
    messages
}
