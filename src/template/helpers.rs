// ABOUTME: Handlebars helper functions for documentation templates
// ABOUTME: Implements htmlId, toUpperCase, eachSorted, equal, ifeq, md, json and ifcontains

use std::sync::Arc;

use handlebars::{
    handlebars_helper, BlockContext, BlockParams, Context, Handlebars, Helper, HelperDef,
    HelperResult, Output, RenderContext, RenderErrorReason, Renderable, StringOutput, Template,
};
use serde_json::Value as Json;
use tracing::debug;

use super::error::Result;
use crate::highlight::{Highlighter, SyntectHighlighter};
use crate::markdown::{strip_wrapping_paragraph, MarkdownOptions, MarkdownRenderer, PulldownRenderer};

/// Names under which [`register_helpers`] installs the helpers
pub const HELPER_NAMES: [&str; 8] = [
    "htmlId",
    "toUpperCase",
    "eachSorted",
    "equal",
    "ifeq",
    "md",
    "json",
    "ifcontains",
];

/// External capabilities the `md` and `json` helpers delegate to
#[derive(Clone)]
pub struct Collaborators {
    pub markdown: Arc<dyn MarkdownRenderer>,
    pub highlighter: Arc<dyn Highlighter>,
}

impl Collaborators {
    pub fn new(markdown: Arc<dyn MarkdownRenderer>, highlighter: Arc<dyn Highlighter>) -> Self {
        Self {
            markdown,
            highlighter,
        }
    }

    /// pulldown-cmark and syntect, sharing one highlighter
    pub fn with_options(options: MarkdownOptions) -> Self {
        let highlighter: Arc<dyn Highlighter> = Arc::new(SyntectHighlighter::new());
        let markdown = Arc::new(PulldownRenderer::with_options(highlighter.clone(), options));
        Self::new(markdown, highlighter)
    }

    pub fn with_defaults() -> Self {
        Self::with_options(MarkdownOptions::default())
    }
}

/// String form of a template value: null becomes empty, strings are taken
/// verbatim, anything else is written as JSON.
pub fn coerce_string(value: &Json) -> String {
    match value {
        Json::Null => String::new(),
        Json::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Replace every character outside `[A-Za-z0-9_-]` with `-`
pub fn html_id(value: &str) -> String {
    value
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// Type-and-value equality. Numbers compare numerically, so `1` equals `1.0`.
pub fn strict_equal(left: &Json, right: &Json) -> bool {
    match (left, right) {
        (Json::Number(a), Json::Number(b)) => a == b || a.as_f64() == b.as_f64(),
        (Json::Array(a), Json::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| strict_equal(x, y))
        }
        (Json::Object(a), Json::Object(b)) => {
            a.len() == b.len()
                && a
                    .iter()
                    .all(|(key, x)| b.get(key).is_some_and(|y| strict_equal(x, y)))
        }
        _ => left == right,
    }
}

handlebars_helper!(HtmlIdHelper: |value: Json| html_id(&coerce_string(value)));

handlebars_helper!(ToUpperCaseHelper: |value: Json| coerce_string(value).to_uppercase());

handlebars_helper!(EqualHelper: |left: Json, right: Json| strict_equal(left, right));

fn render_branch<'reg: 'rc, 'rc>(
    branch: Option<&'rc Template>,
    r: &'reg Handlebars<'reg>,
    ctx: &'rc Context,
    rc: &mut RenderContext<'reg, 'rc>,
    out: &mut dyn Output,
) -> HelperResult {
    match branch {
        Some(template) => template.render(r, ctx, rc, out),
        None => Ok(()),
    }
}

/// Block helper iterating an object's entries in key order
#[derive(Clone, Copy)]
pub struct EachSortedHelper;

impl HelperDef for EachSortedHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let Some(template) = h.template() else {
            return Ok(());
        };

        let object = match h.param(0).map(|p| p.value()) {
            Some(Json::Object(object)) if !object.is_empty() => object,
            _ => {
                debug!("eachSorted called without a non-empty object, rendering nothing");
                return Ok(());
            }
        };

        let mut entries: Vec<(&String, &Json)> = object.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        let length = entries.len();

        rc.push_block(BlockContext::new());
        for (index, (key, value)) in entries.into_iter().enumerate() {
            if let Some(block) = rc.block_mut() {
                block.set_base_value(value.clone());
                block.set_local_var("first", Json::from(index == 0));
                block.set_local_var("last", Json::from(index + 1 == length));
                block.set_local_var("index", Json::from(index));
                block.set_local_var("length", Json::from(length));
                block.set_local_var("key", Json::from(key.as_str()));

                if let Some(value_name) = h.block_param() {
                    let mut params = BlockParams::new();
                    params.add_value(value_name, value.clone())?;
                    block.set_block_params(params);
                } else if let Some((value_name, key_name)) = h.block_param_pair() {
                    let mut params = BlockParams::new();
                    params.add_value(value_name, value.clone())?;
                    params.add_value(key_name, Json::from(key.as_str()))?;
                    block.set_block_params(params);
                }
            }
            template.render(r, ctx, rc, out)?;
        }
        rc.pop_block();

        Ok(())
    }
}

/// Renders the block when both parameters are strictly equal, else the inverse
#[derive(Clone, Copy)]
pub struct IfEqHelper;

impl HelperDef for IfEqHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let left = h
            .param(0)
            .ok_or(RenderErrorReason::ParamNotFoundForIndex("ifeq", 0))?;
        let right = h
            .param(1)
            .ok_or(RenderErrorReason::ParamNotFoundForIndex("ifeq", 1))?;

        let branch = if strict_equal(left.value(), right.value()) {
            h.template()
        } else {
            h.inverse()
        };
        render_branch(branch, r, ctx, rc, out)
    }
}

/// Renders the block when the array holds an element equal to the value
#[derive(Clone, Copy)]
pub struct IfContainsHelper;

impl HelperDef for IfContainsHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let target = h
            .param(1)
            .ok_or(RenderErrorReason::ParamNotFoundForIndex("ifcontains", 1))?;

        let contains = h
            .param(0)
            .and_then(|p| p.value().as_array())
            .is_some_and(|items| items.iter().any(|item| strict_equal(item, target.value())));

        let branch = if contains {
            h.template()
        } else {
            h.inverse()
        };
        render_branch(branch, r, ctx, rc, out)
    }
}

/// Renders markdown, either the first parameter or the block content
pub struct MarkdownHelper {
    renderer: Arc<dyn MarkdownRenderer>,
}

impl MarkdownHelper {
    pub fn new(renderer: Arc<dyn MarkdownRenderer>) -> Self {
        Self { renderer }
    }
}

impl HelperDef for MarkdownHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let source = match (h.param(0), h.template()) {
            (Some(param), _) => coerce_string(param.value()),
            (None, Some(template)) => {
                let mut buffer = StringOutput::new();
                template.render(r, ctx, rc, &mut buffer)?;
                buffer
                    .into_string()
                    .map_err(|e| RenderErrorReason::Other(format!("md block: {}", e)))?
            }
            (None, None) => String::new(),
        };

        if source.trim().is_empty() {
            return Ok(());
        }

        let html = self
            .renderer
            .render(&source)
            .map_err(|e| RenderErrorReason::Other(format!("md helper: {}", e)))?;

        let strip_paragraph = h
            .hash_get("stripParagraph")
            .and_then(|v| v.value().as_bool())
            .unwrap_or(false);

        if strip_paragraph {
            out.write(strip_wrapping_paragraph(&html))?;
        } else {
            out.write(&html)?;
        }
        Ok(())
    }
}

/// Pretty-prints a value as highlighted JSON
pub struct JsonHelper {
    highlighter: Arc<dyn Highlighter>,
}

impl JsonHelper {
    pub fn new(highlighter: Arc<dyn Highlighter>) -> Self {
        Self { highlighter }
    }
}

impl HelperDef for JsonHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let value = h.param(0).map(|p| p.value()).unwrap_or(&Json::Null);
        if value.is_null() {
            return Ok(());
        }

        let text = serde_json::to_string_pretty(value)
            .map_err(|e| RenderErrorReason::Other(format!("json helper: {}", e)))?;
        let html = self
            .highlighter
            .highlight(&text, Some("json"))
            .map_err(|e| RenderErrorReason::Other(format!("json helper: {}", e)))?;

        out.write(&html)?;
        Ok(())
    }
}

/// Register all documentation helpers with a Handlebars instance
pub fn register_helpers(handlebars: &mut Handlebars, collaborators: &Collaborators) -> Result<()> {
    handlebars.register_helper("htmlId", Box::new(HtmlIdHelper));
    handlebars.register_helper("toUpperCase", Box::new(ToUpperCaseHelper));
    handlebars.register_helper("eachSorted", Box::new(EachSortedHelper));
    handlebars.register_helper("equal", Box::new(EqualHelper));
    handlebars.register_helper("ifeq", Box::new(IfEqHelper));
    handlebars.register_helper(
        "md",
        Box::new(MarkdownHelper::new(collaborators.markdown.clone())),
    );
    handlebars.register_helper(
        "json",
        Box::new(JsonHelper::new(collaborators.highlighter.clone())),
    );
    handlebars.register_helper("ifcontains", Box::new(IfContainsHelper));

    debug!("Registered {} template helpers", HELPER_NAMES.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight;
    use crate::markdown;
    use serde_json::json;

    struct EchoMarkdown;

    impl MarkdownRenderer for EchoMarkdown {
        fn render(&self, source: &str) -> markdown::Result<String> {
            Ok(format!("<p>{}</p>\n", source))
        }
    }

    struct TagHighlighter;

    impl Highlighter for TagHighlighter {
        fn highlight(&self, code: &str, language: Option<&str>) -> highlight::Result<String> {
            Ok(format!("<{}>{}</>", language.unwrap_or("auto"), code))
        }
    }

    fn create_test_handlebars() -> Handlebars<'static> {
        let collaborators = Collaborators::new(Arc::new(EchoMarkdown), Arc::new(TagHighlighter));
        let mut handlebars = Handlebars::new();
        register_helpers(&mut handlebars, &collaborators).unwrap();
        handlebars
    }

    #[test]
    fn test_coerce_string() {
        assert_eq!(coerce_string(&Json::Null), "");
        assert_eq!(coerce_string(&json!("abc")), "abc");
        assert_eq!(coerce_string(&json!(42)), "42");
        assert_eq!(coerce_string(&json!(true)), "true");
    }

    #[test]
    fn test_html_id() {
        assert_eq!(html_id(";/abc"), "--abc");
        assert_eq!(html_id("a b  c"), "a-b--c");
        assert_eq!(html_id("Valid_id-1"), "Valid_id-1");
        assert_eq!(html_id("ä"), "-");
        assert_eq!(html_id(""), "");
    }

    #[test]
    fn test_strict_equal() {
        assert!(strict_equal(&json!(6), &json!(6)));
        assert!(strict_equal(&json!(1), &json!(1.0)));
        assert!(!strict_equal(&json!(7), &json!(6)));
        assert!(!strict_equal(&json!("6"), &json!(6)));
        assert!(!strict_equal(&json!(null), &json!(false)));
        assert!(strict_equal(&json!({"a": [1, 2]}), &json!({"a": [1.0, 2]})));
        assert!(!strict_equal(&json!([1, 2]), &json!([2, 1])));
    }

    #[test]
    fn test_html_id_helper() {
        let handlebars = create_test_handlebars();
        let result = handlebars
            .render_template("{{htmlId id}}", &json!({"id": ";/abc"}))
            .unwrap();
        assert_eq!(result, "--abc");

        let missing = handlebars.render_template("{{htmlId id}}", &json!({})).unwrap();
        assert_eq!(missing, "");
    }

    #[test]
    fn test_to_upper_case_helper() {
        let handlebars = create_test_handlebars();
        let result = handlebars
            .render_template("{{toUpperCase id}}", &json!({"id": ";/abc"}))
            .unwrap();
        assert_eq!(result, ";/ABC");

        let null = handlebars
            .render_template("{{toUpperCase id}}", &json!({"id": null}))
            .unwrap();
        assert_eq!(null, "");
    }

    #[test]
    fn test_to_upper_case_output_is_escaped() {
        let handlebars = create_test_handlebars();
        let result = handlebars
            .render_template("{{toUpperCase id}}", &json!({"id": "<b>"}))
            .unwrap();
        assert_eq!(result, "&lt;B&gt;");
    }

    #[test]
    fn test_each_sorted_block_params() {
        let handlebars = create_test_handlebars();
        let result = handlebars
            .render_template(
                "{{#eachSorted this as |value name|}}{{name}}={{value}};{{/eachSorted}}",
                &json!({"b": 2, "a": 1}),
            )
            .unwrap();
        assert_eq!(result, "a=1;b=2;");
    }

    #[test]
    fn test_each_sorted_single_block_param() {
        let handlebars = create_test_handlebars();
        let result = handlebars
            .render_template(
                "{{#eachSorted o as |v|}}[{{v}}:{{@key}}]{{/eachSorted}}",
                &json!({"o": {"b": 2, "a": 1}}),
            )
            .unwrap();
        assert_eq!(result, "[1:a][2:b]");
    }

    #[test]
    fn test_each_sorted_nested_values() {
        let handlebars = create_test_handlebars();
        let result = handlebars
            .render_template(
                "{{#eachSorted items}}{{@key}}:{{title}} {{/eachSorted}}",
                &json!({"items": {"z": {"title": "last"}, "m": {"title": "middle"}}}),
            )
            .unwrap();
        assert_eq!(result, "m:middle z:last ");
    }

    #[test]
    fn test_each_sorted_ignores_non_objects() {
        let handlebars = create_test_handlebars();
        for data in [json!({"v": [1, 2]}), json!({"v": "text"}), json!({"v": {}})] {
            let result = handlebars
                .render_template("{{#eachSorted v}}x{{/eachSorted}}", &data)
                .unwrap();
            assert_eq!(result, "");
        }
    }

    #[test]
    fn test_ifeq_without_inverse() {
        let handlebars = create_test_handlebars();
        let result = handlebars
            .render_template("{{#ifeq a b}}same{{/ifeq}}", &json!({"a": 1, "b": 2}))
            .unwrap();
        assert_eq!(result, "");
    }

    #[test]
    fn test_ifcontains_non_array() {
        let handlebars = create_test_handlebars();
        let result = handlebars
            .render_template(
                "{{#ifcontains list 1}}yes{{else}}no{{/ifcontains}}",
                &json!({"list": "1"}),
            )
            .unwrap();
        assert_eq!(result, "no");
    }

    #[test]
    fn test_md_block_form() {
        let handlebars = create_test_handlebars();
        let result = handlebars
            .render_template("{{#md}}hello {{name}}{{/md}}", &json!({"name": "world"}))
            .unwrap();
        assert_eq!(result.trim(), "<p>hello world</p>");
    }

    #[test]
    fn test_md_output_is_not_escaped() {
        let handlebars = create_test_handlebars();
        let result = handlebars
            .render_template("{{md text stripParagraph=true}}", &json!({"text": "<b>x</b>"}))
            .unwrap();
        assert_eq!(result, "<b>x</b>");
    }

    #[test]
    fn test_json_uses_json_mode() {
        let handlebars = create_test_handlebars();
        let result = handlebars
            .render_template("{{json value}}", &json!({"value": [1]}))
            .unwrap();
        assert_eq!(result, "<json>[\n  1\n]</>");
    }
}
