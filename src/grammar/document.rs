/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Documents and stream composition.
//!
//! The stream loop is the error boundary of the whole
//! parser: Aborts from anywhere below surface here, get
//! stamped with the index of the document being parsed,
//! and fail the entire stream.
//!
//! Tag handle bindings are per document; every document
//! starts back at the '!' and '!!' defaults.

use crate::{
    flag::{Flags, O_PEDANTIC},
    grammar::{
        block::block_node,
        comment::sl_comments,
        context::{Context, Indent},
        cursor::Cursor,
        directive::directive,
        error::{Code, Diagnostic, Fault},
        props::Binds,
    },
    tree::{
        Directive, Document, DocumentKind, Node, Position, Stream, Warning, WarningCode,
    },
};

/// An abort bound to the document it happened in
#[derive(Debug)]
pub(crate) struct StreamFault
{
    pub diagnostic: Diagnostic,
    pub document:   usize,
}

/// l-yaml-stream: the parser's entry point
pub(crate) fn parse_stream(opts: Flags, src: &str) -> Result<Stream, StreamFault>
{
    let mut cur = Cursor::new(src);
    let mut documents: Vec<Document> = Vec::new();

    // Tracks whether the next document is allowed to be
    // bare: only the first document and those following a
    // '...' suffix are
    let mut bare_allowed = true;

    loop
    {
        cur = document_prefix(cur);

        if cur.is_end()
        {
            return Ok(Stream { documents });
        }

        let index = documents.len();
        let stamp = |fault: Fault| StreamFault {
            diagnostic: fault.into_diagnostic(),
            document:   index,
        };

        if at_suffix(&cur)
        {
            cur = suffix(cur).map_err(stamp)?;
            bare_allowed = true;

            continue;
        }

        if !bare_allowed && !cur.starts_with("%") && !at_directives_end(&cur)
        {
            return Err(stamp(Fault::abort(Code::MissingDocumentStart, &cur)));
        }

        let (document, next) = any_document(opts, cur).map_err(stamp)?;

        documents.push(document);
        cur = next;
        bare_allowed = false;
    }
}

/// l-any-document: directive, explicit or bare
fn any_document(opts: Flags, cur: Cursor<'_>) -> Result<(Document, Cursor<'_>), Fault>
{
    if cur.starts_with("%")
    {
        return directive_document(opts, cur);
    }

    let binds = Binds::with_defaults();

    if at_directives_end(&cur)
    {
        let (root, next) = explicit_body(&binds, cur.skip(3))?;

        return Ok((
            Document {
                kind: DocumentKind::Explicit,
                directives: Vec::new(),
                root,
                warnings: Vec::new(),
            },
            next,
        ));
    }

    // l-bare-document
    let (root, next) = block_node(&binds, cur, Indent::TOP, Context::BlockIn)
        .map_err(Fault::commit)?;

    Ok((
        Document {
            kind: DocumentKind::Bare,
            directives: Vec::new(),
            root,
            warnings: Vec::new(),
        },
        next,
    ))
}

/// l-directive-document: one or more directives, then an
/// explicit document
fn directive_document(opts: Flags, cur: Cursor<'_>) -> Result<(Document, Cursor<'_>), Fault>
{
    let mut cur = cur;
    let mut directives = Vec::new();
    let mut warnings = Vec::new();
    let mut binds = Binds::with_defaults();
    let mut versioned = false;

    loop
    {
        let at = cur.pos();

        match directive(cur)
        {
            Ok(((parsed, warn), next)) =>
            {
                if let Some((code, position)) = warn
                {
                    note(opts, &mut warnings, code, position)?;
                }

                match &parsed
                {
                    Directive::Yaml(..) =>
                    {
                        if versioned
                        {
                            return Err(Fault::abort_at(Code::DuplicateVersion, at));
                        }

                        versioned = true;
                    },
                    Directive::Tag { handle, prefix } =>
                    {
                        if !binds.bind(handle, prefix)
                        {
                            note(opts, &mut warnings, WarningCode::DuplicateTagHandle, at)?;
                        }
                    },
                    Directive::Reserved { .. } => (),
                }

                directives.push(parsed);
                cur = next;
            },
            Err(abort @ Fault::Abort(_)) => return Err(abort),
            Err(_) => break,
        }
    }

    if !at_directives_end(&cur)
    {
        return Err(Fault::abort(Code::MissingDocumentStart, &cur));
    }

    let (root, next) = explicit_body(&binds, cur.skip(3))?;

    Ok((
        Document {
            kind: DocumentKind::Directive,
            directives,
            root,
            warnings,
        },
        next,
    ))
}

/// The content of an explicit document: a bare document or
/// an empty node with comments
fn explicit_body<'a>(binds: &Binds, cur: Cursor<'a>) -> Result<(Node, Cursor<'a>), Fault>
{
    match block_node(binds, cur, Indent::TOP, Context::BlockIn)
    {
        Ok(done) => Ok(done),
        Err(abort @ Fault::Abort(_)) => Err(abort),
        Err(_) => match sl_comments(cur)
        {
            Ok(((), next)) => Ok((Node::empty(), next)),
            Err(fault) => Err(Fault::abort_at(
                Code::TrailingContent,
                fault.diagnostic().position,
            )),
        },
    }
}

/// Attach a warning to the document, or fail outright when
/// running pedantically
fn note(
    opts: Flags,
    warnings: &mut Vec<Warning>,
    code: WarningCode,
    position: Position,
) -> Result<(), Fault>
{
    if opts.contains(O_PEDANTIC)
    {
        return Err(Fault::abort_at(promote(code), position));
    }

    warnings.push(Warning { code, position });

    Ok(())
}

/// The error a warning becomes under O_PEDANTIC
fn promote(code: WarningCode) -> Code
{
    match code
    {
        WarningCode::VersionUnsupported => Code::UnsupportedVersion,
        WarningCode::UnknownDirective => Code::UnknownDirective,
        WarningCode::DuplicateTagHandle => Code::DuplicateTagDirective,
    }
}

/// l-document-prefix: an optional byte order mark and any
/// number of blank or comment lines
fn document_prefix(cur: Cursor<'_>) -> Cursor<'_>
{
    let mut cur = cur;

    loop
    {
        cur = cur.skip_bom();

        match sl_comments(cur)
        {
            Ok(((), next)) if next.pos().offset > cur.pos().offset => cur = next,
            _ => return cur,
        }
    }
}

/// l-document-suffix: '...' and the rest of its line
fn suffix(cur: Cursor<'_>) -> Result<Cursor<'_>, Fault>
{
    let cur = cur.skip(3);

    match sl_comments(cur)
    {
        Ok(((), next)) => Ok(next),
        Err(fault) => Err(Fault::abort_at(
            Code::TrailingContent,
            fault.diagnostic().position,
        )),
    }
}

fn at_suffix(cur: &Cursor<'_>) -> bool
{
    cur.at_document_marker() && cur.starts_with("...")
}

fn at_directives_end(cur: &Cursor<'_>) -> bool
{
    cur.at_document_marker() && cur.starts_with("---")
}
