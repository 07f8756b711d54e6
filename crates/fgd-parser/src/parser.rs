//! Line-oriented recursive descent over the scanned source.
//!
//! The top level dispatches on the directive keyword. Blocks are read with
//! [`Parser::next_in_block`], which stops at the matching `]`; nested blocks
//! (item lists, sub-groups) recurse through the same helper.

mod entity;

use fgd_core::{
    AutoVisGroup, ClassType, Document, Element, Include, MapSize, MaterialExclusion, Version,
    VisGroupChild,
};
use log::{debug, trace};
use winnow::Parser as _;

use crate::{
    Parsed,
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    grammar,
    scanner::{Line, LineScanner},
};

/// Single-use parser state.
pub(crate) struct Parser {
    scanner: LineScanner,
    document: Document,
    diagnostics: DiagnosticCollector,
}

impl Parser {
    pub(crate) fn new(source: &str) -> Self {
        Self {
            scanner: LineScanner::new(source),
            document: Document::new(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    pub(crate) fn parse(mut self) -> Parsed {
        while let Some(line) = self.scanner.next() {
            self.top_level(line);
        }
        Parsed {
            document: self.document,
            diagnostics: self.diagnostics.finish(),
        }
    }

    fn top_level(&mut self, line: Line) {
        if line.is("]") {
            self.emit(Diagnostic::error(ErrorCode::E101, "unmatched `]`").at(&line));
            return;
        }
        if line.is("[") {
            self.emit(
                Diagnostic::error(ErrorCode::E101, "block without a directive").at(&line),
            );
            self.skip_nested();
            return;
        }
        let Some(keyword) = directive_keyword(line.text()) else {
            self.emit(
                Diagnostic::error(ErrorCode::E101, "expected a directive starting with `@`")
                    .at(&line)
                    .with_help("lines outside of blocks must start with `@`"),
            );
            return;
        };

        trace!(keyword = keyword.as_str(), line = line.number(); "Directive");
        match keyword.as_str() {
            "include" => self.include(line),
            "mapsize" => self.mapsize(line),
            "version" => self.version(line),
            "materialexclusion" => self.material_exclusion(line),
            "autovisgroup" => self.autovisgroup(line),
            other if other.parse::<ClassType>().is_ok() || other.ends_with("class") => {
                self.entity_class(line)
            }
            other => {
                self.emit(
                    Diagnostic::error(ErrorCode::E100, format!("unknown directive `@{other}`"))
                        .at(&line),
                );
                self.skip_block();
            }
        }
    }

    fn include(&mut self, line: Line) {
        match grammar::include.parse(line.text()) {
            Ok(file_path) => {
                debug!(path = file_path.as_str(); "Include");
                self.document.push(Include { file_path });
            }
            Err(_) => self.malformed(&line, "expected `@include \"path\"`"),
        }
    }

    fn mapsize(&mut self, line: Line) {
        match grammar::mapsize.parse(line.text()) {
            Ok((min, max)) => {
                self.document.push(Element::MapSize(MapSize { min, max }));
            }
            Err(_) => self.malformed(&line, "expected `@mapsize(min, max)`"),
        }
    }

    fn version(&mut self, line: Line) {
        match grammar::version.parse(line.text()) {
            Ok(number) => {
                self.document.push(Element::Version(Version { number }));
            }
            Err(_) => self.malformed(&line, "expected `@version(number)`"),
        }
    }

    fn material_exclusion(&mut self, line: Line) {
        if grammar::material_exclusion.parse(line.text()).is_err() {
            self.malformed(&line, "expected `@MaterialExclusion` on its own line");
            self.skip_block();
            return;
        }

        let mut exclusion = MaterialExclusion::default();
        if let Some(open) = self.scanner.eat("[") {
            while let Some(entry) = self.next_in_block(&open) {
                if entry.is("[") {
                    self.malformed_entry(&entry, "unexpected nested block");
                    self.skip_nested();
                    continue;
                }
                match grammar::quoted_string.parse(entry.text()) {
                    Ok(path) => exclusion.excluded_paths.push(path),
                    Err(_) => self.malformed_entry(&entry, "expected a quoted material path"),
                }
            }
        }
        debug!(paths = exclusion.excluded_paths.len(); "Material exclusion");
        self.document.push(Element::MaterialExclusion(exclusion));
    }

    fn autovisgroup(&mut self, line: Line) {
        let parent_name = match grammar::autovisgroup.parse(line.text()) {
            Ok(name) => name,
            Err(_) => {
                self.malformed(&line, "expected `@AutoVisGroup = \"Name\"`");
                self.skip_block();
                return;
            }
        };

        let mut group = AutoVisGroup::new(parent_name);
        if let Some(open) = self.scanner.eat("[") {
            group.children = self.visgroup_children(&open);
        }
        debug!(group = group.parent_name.as_str(), depth = group.depth(); "AutoVisGroup");
        self.document.push(group);
    }

    /// Children of the group block opened by `open`.
    ///
    /// A quoted name followed by its own block is a sub-group, any other
    /// quoted name is an entity class.
    fn visgroup_children(&mut self, open: &Line) -> Vec<VisGroupChild> {
        let mut children = Vec::new();
        while let Some(line) = self.next_in_block(open) {
            if line.is("[") {
                self.malformed_entry(&line, "block without a group name");
                self.skip_nested();
                continue;
            }
            let name = match grammar::quoted_string.parse(line.text()) {
                Ok(name) => name,
                Err(_) => {
                    self.malformed_entry(&line, "expected a quoted group or class name");
                    continue;
                }
            };
            match self.scanner.eat("[") {
                Some(sub_open) => {
                    let mut group = AutoVisGroup::new(name);
                    group.children = self.visgroup_children(&sub_open);
                    children.push(VisGroupChild::Group(group));
                }
                None => children.push(VisGroupChild::Entity(name)),
            }
        }
        children
    }

    /// The next line inside the block opened by `open`, or `None` once the
    /// block is closed.
    ///
    /// The closing `]` is consumed. A missing `]` (end of input, or a new
    /// directive where a block line was expected) closes the block with a
    /// warning.
    fn next_in_block(&mut self, open: &Line) -> Option<Line> {
        let closed = match self.scanner.peek() {
            None => true,
            Some(line) if line.text().starts_with('@') => true,
            Some(line) if line.is("]") => {
                self.scanner.next();
                return None;
            }
            Some(_) => false,
        };
        if closed {
            self.emit(
                Diagnostic::warning(ErrorCode::E204, "block is never closed")
                    .at(open)
                    .with_help("add the missing `]`"),
            );
            return None;
        }
        self.scanner.next()
    }

    /// Skip a block that may follow a dropped directive.
    fn skip_block(&mut self) {
        if self.scanner.eat("[").is_some() {
            self.skip_nested();
        }
    }

    /// Skip everything up to the `]` matching an already consumed `[`.
    fn skip_nested(&mut self) {
        let mut depth = 1usize;
        while let Some(line) = self.scanner.peek() {
            if line.text().starts_with('@') {
                return;
            }
            if line.is("[") {
                depth += 1;
            } else if line.is("]") {
                depth -= 1;
            }
            self.scanner.next();
            if depth == 0 {
                return;
            }
        }
    }

    /// The whole directive on `line` is dropped.
    fn malformed(&mut self, line: &Line, message: &str) {
        self.emit(Diagnostic::error(ErrorCode::E102, message).at(line));
    }

    /// One entry of a kept directive's block is dropped.
    fn malformed_entry(&mut self, line: &Line, message: &str) {
        self.emit(Diagnostic::warning(ErrorCode::E102, message).at(line));
    }

    fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.emit(diagnostic);
    }
}

/// Lower-cased word after a leading `@`.
fn directive_keyword(text: &str) -> Option<String> {
    let rest = text.strip_prefix('@')?;
    let end = rest
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    Some(rest[..end].to_ascii_lowercase())
}
