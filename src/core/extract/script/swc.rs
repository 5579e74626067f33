//! In-process script extraction with swc.

use std::{collections::HashMap, fs, path::Path, sync::Arc};

use anyhow::{Context, Result, anyhow};
use colored::Colorize;
use rayon::prelude::*;
use swc_common::{FileName, GLOBALS, Globals, SourceMap, comments::SingleThreadedComments};
use swc_ecma_ast::{BinaryOp, CallExpr, Callee, Expr, Lit, MemberProp};
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};
use swc_ecma_visit::{Visit, VisitWith};

use super::{CallRule, ParseFailure, ScriptExtraction, ScriptExtractor};
use crate::core::{catalog::MessageEntry, scanner::find_glob_files, tools::ToolRunner};

#[derive(Debug, Clone)]
pub struct SwcBackend {
    pub patterns: Vec<String>,
    pub ignore: Vec<String>,
    pub skip_folders: Vec<String>,
    pub rules: Vec<CallRule>,
    pub verbose: bool,
}

impl ScriptExtractor for SwcBackend {
    fn extract(&self, root: &Path, _runner: &dyn ToolRunner) -> Result<ScriptExtraction> {
        let files = find_glob_files(
            root,
            &self.patterns,
            &self.ignore,
            &self.skip_folders,
            self.verbose,
        );
        let rules: HashMap<&str, &CallRule> = self
            .rules
            .iter()
            .map(|rule| (rule.expression.as_str(), rule))
            .collect();

        let results: Vec<_> = files
            .par_iter()
            .map(|file| (file, extract_file(&file.path, &file.relative, &rules)))
            .collect();

        let mut extraction = ScriptExtraction::default();
        for (file, result) in results {
            match result {
                Ok(entries) => extraction.entries.extend(entries),
                Err(e) => {
                    if self.verbose {
                        eprintln!("{} {} - {}", "warning:".bold().yellow(), file.relative, e);
                    }
                    extraction.parse_failures.push(ParseFailure {
                        path: file.relative.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        Ok(extraction)
    }
}

/// Parse one file and collect the entries of every matching call.
fn extract_file(
    path: &Path,
    relative: &str,
    rules: &HashMap<&str, &CallRule>,
) -> Result<Vec<MessageEntry>> {
    let code = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let tsx = path.extension().is_some_and(|ext| ext == "tsx");

    extract_source(code, relative, tsx, rules)
}

fn extract_source(
    code: String,
    relative: &str,
    tsx: bool,
    rules: &HashMap<&str, &CallRule>,
) -> Result<Vec<MessageEntry>> {
    let source_map = Arc::new(SourceMap::default());

    GLOBALS.set(&Globals::new(), || {
        let source_file =
            source_map.new_source_file(FileName::Real(relative.into()).into(), code);

        let syntax = Syntax::Typescript(TsSyntax {
            tsx,
            decorators: true,
            ..Default::default()
        });

        let comments = SingleThreadedComments::default();
        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), Some(&comments));
        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("Failed to parse script: {:?}", e.kind()))?;

        let comment_lines = collect_comment_lines(&comments, &source_map);
        let mut collector = CallCollector {
            rules,
            source_map: &source_map,
            comment_lines: &comment_lines,
            path: relative,
            entries: Vec::new(),
        };
        module.visit_with(&mut collector);

        Ok(collector.entries)
    })
}

/// Comment text keyed by the line the comment ends on.
fn collect_comment_lines(
    comments: &SingleThreadedComments,
    source_map: &SourceMap,
) -> HashMap<usize, String> {
    let (leading, trailing) = comments.borrow_all();
    let mut all_comments: Vec<_> = leading
        .iter()
        .chain(trailing.iter())
        .flat_map(|(_, cmts)| cmts.iter())
        .collect();
    all_comments.sort_by_key(|cmt| cmt.span.lo);
    all_comments.dedup_by_key(|cmt| cmt.span.lo);

    let mut lines: HashMap<usize, String> = HashMap::new();
    for cmt in all_comments {
        let text = cmt
            .text
            .lines()
            .map(|l| l.trim().trim_start_matches('*').trim())
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if text.is_empty() {
            continue;
        }

        let line = source_map.lookup_char_pos(cmt.span.hi).line;
        lines
            .entry(line)
            .and_modify(|existing| {
                existing.push(' ');
                existing.push_str(&text);
            })
            .or_insert(text);
    }
    lines
}

struct CallCollector<'a> {
    rules: &'a HashMap<&'a str, &'a CallRule>,
    source_map: &'a SourceMap,
    comment_lines: &'a HashMap<usize, String>,
    path: &'a str,
    entries: Vec<MessageEntry>,
}

impl CallCollector<'_> {
    fn entry_for(&self, node: &CallExpr, rule: &CallRule) -> Option<MessageEntry> {
        let arg = |index: usize| {
            node.args
                .get(index)
                .filter(|a| a.spread.is_none())
                .and_then(|a| string_value(&a.expr))
        };

        let text = arg(rule.arguments.text)?;
        let mut entry = MessageEntry::new(text);

        if let Some(index) = rule.arguments.text_plural {
            entry.msgid_plural = Some(arg(index)?);
            entry.msgstr_plural = vec![String::new(), String::new()];
        }
        if let Some(index) = rule.arguments.context {
            entry.msgctxt = Some(arg(index)?);
        }

        let line = self.source_map.lookup_char_pos(node.span.lo).line;
        entry = entry.with_occurrence(self.path, line);
        if let Some(comment) = line
            .checked_sub(1)
            .and_then(|above| self.comment_lines.get(&above))
        {
            entry.comment = Some(comment.clone());
        }

        Some(entry)
    }
}

impl Visit for CallCollector<'_> {
    fn visit_call_expr(&mut self, node: &CallExpr) {
        if let Callee::Expr(callee) = &node.callee
            && let Some(expression) = flatten_callee(callee)
            && let Some(rule) = self.rules.get(expression.as_str())
            && let Some(entry) = self.entry_for(node, rule)
        {
            self.entries.push(entry);
        }

        node.visit_children_with(self);
    }
}

/// Dotted form of a callee, e.g. `this._trans.__`.
fn flatten_callee(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Ident(ident) => Some(ident.sym.to_string()),
        Expr::This(_) => Some("this".to_string()),
        Expr::Member(member) => {
            let MemberProp::Ident(prop) = &member.prop else {
                return None;
            };
            let object = flatten_callee(&member.obj)?;
            Some(format!("{}.{}", object, prop.sym))
        }
        Expr::Paren(paren) => flatten_callee(&paren.expr),
        Expr::TsNonNull(non_null) => flatten_callee(&non_null.expr),
        _ => None,
    }
}

/// Static string value of a literal, a substitution-free template or a `+`
/// concatenation of those.
fn string_value(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Lit(Lit::Str(s)) => s.value.as_str().map(|s| s.to_string()),
        Expr::Tpl(tpl) if tpl.exprs.is_empty() => tpl
            .quasis
            .first()
            .and_then(|q| q.cooked.as_ref())
            .and_then(|s| s.as_str())
            .map(|s| s.to_string()),
        Expr::Bin(bin) if bin.op == BinaryOp::Add => {
            let mut value = string_value(&bin.left)?;
            value.push_str(&string_value(&bin.right)?);
            Some(value)
        }
        Expr::Paren(paren) => string_value(&paren.expr),
        _ => None,
    }
}
