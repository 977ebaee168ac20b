//! Built-in snippet tables and default variables.
//!
//! Tables are keyed by name (`html`, `css`, `xsl`). The registry builder
//! seeds every registry with the table for its abbreviation type, adds the
//! syntax table when one exists, and resolves string references in user
//! snippet lists against these names.

use once_cell::sync::Lazy;
use std::collections::{BTreeMap, HashMap};
use xabbr_core::SnippetLayer;

/// Name of the markup base table.
pub const MARKUP_TABLE: &str = "html";
/// Name of the stylesheet base table.
pub const STYLESHEET_TABLE: &str = "css";

const HTML_SNIPPETS: &[(&str, &str)] = &[
    ("a", "a[href]"),
    ("a:blank", "a[href='http://${0}' target='_blank' rel='noopener noreferrer']"),
    ("a:link", "a[href='http://${0}']"),
    ("a:mail", "a[href='mailto:${0}']"),
    ("abbr", "abbr[title]"),
    ("acr|acronym", "acronym[title]"),
    ("base", "base[href]/"),
    ("basefont", "basefont/"),
    ("br", "br/"),
    ("frame", "frame/"),
    ("hr", "hr/"),
    ("bdo", "bdo[dir]"),
    ("bdo:r", "bdo[dir=rtl]"),
    ("bdo:l", "bdo[dir=ltr]"),
    ("col", "col/"),
    ("link", "link[rel=stylesheet href]/"),
    ("link:css", "link[href='${1:style}.css']"),
    ("link:print", "link[href='${1:print}.css' media=print]"),
    ("link:favicon", "link[rel='shortcut icon' type=image/x-icon href='${1:favicon.ico}']"),
    ("link:touch", "link[rel=apple-touch-icon href='${1:favicon.png}']"),
    ("link:rss", "link[rel=alternate type=application/rss+xml title=RSS href='${1:rss.xml}']"),
    ("meta", "meta/"),
    ("meta:utf", "meta[http-equiv=Content-Type content='text/html;charset=UTF-8']"),
    ("meta:vp", "meta[name=viewport content='width=${1:device-width}, initial-scale=${2:1.0}']"),
    ("meta:compat", "meta[http-equiv=X-UA-Compatible content='${1:IE=7}']"),
    ("meta:redirect", "meta[http-equiv=refresh content='0; url=${1:http://example.com}']"),
    ("style", "style"),
    ("script", "script[!src]"),
    ("script:src", "script[src]"),
    ("img", "img[src alt]/"),
    ("img:s|img:srcset", "img[srcset src alt]"),
    ("img:z|img:sizes", "img[sizes srcset src alt]"),
    ("picture", "picture"),
    ("src|source", "source/"),
    ("src:sc|source:src", "source[src type]"),
    ("ifr|iframe", "iframe[src frameborder=0]"),
    ("emb|embed", "embed[src type]/"),
    ("obj|object", "object[data type]"),
    ("param", "param[name value]/"),
    ("map", "map[name]"),
    ("area", "area[shape coords href alt]/"),
    ("form", "form[action]"),
    ("form:get", "form[method=get]"),
    ("form:post", "form[method=post]"),
    ("label", "label[for]"),
    ("input", "input[type=${1:text}]/"),
    ("inp", "input[name=${1} id=${1}]"),
    ("input:h|input:hidden", "input[type=hidden name]"),
    ("input:t|input:text", "inp[type=text]"),
    ("input:search", "inp[type=search]"),
    ("input:email", "inp[type=email]"),
    ("input:url", "inp[type=url]"),
    ("input:p|input:password", "inp[type=password]"),
    ("input:c|input:checkbox", "inp[type=checkbox]"),
    ("input:r|input:radio", "inp[type=radio]"),
    ("input:f|input:file", "inp[type=file]"),
    ("input:s|input:submit", "input[type=submit value]"),
    ("input:b|input:button", "input[type=button value]"),
    ("select", "select[name=${1} id=${1}]"),
    ("option", "option[value]"),
    ("textarea", "textarea[name=${1} id=${1} cols=${2:30} rows=${3:10}]"),
    ("btn", "button"),
    ("btn:s|button:s|button:submit", "button[type=submit]"),
    ("btn:r|button:r|button:reset", "button[type=reset]"),
    ("btn:d|button:d|button:disabled", "button[disabled.]"),
    ("fst|fset", "fieldset"),
    ("fst:d|fset:d", "fieldset[disabled.]"),
    ("optg", "optgroup"),
    ("tarea", "textarea"),
    ("leg", "legend"),
    ("sect", "section"),
    ("art", "article"),
    ("hdr", "header"),
    ("ftr", "footer"),
    ("adr", "address"),
    ("dlg", "dialog"),
    ("str", "strong"),
    ("prog", "progress"),
    ("mn", "main"),
    ("tem", "template"),
    ("datal", "datalist"),
    ("out", "output"),
    ("det", "details"),
    ("bq", "blockquote"),
    ("fig", "figure"),
    ("figc", "figcaption"),
    ("pic", "picture"),
    ("!!!", "{<!DOCTYPE html>}"),
    (
        "doc",
        "html[lang=${lang}]>(head>meta[charset=${charset}]+meta:vp+title{${1:Document}})+body",
    ),
    ("!|html:5", "!!!+doc"),
    ("c", "{<!-- ${0} -->}"),
    ("cc:ie", "{<!--[if IE]>${0}<![endif]-->}"),
    ("cc:noie", "{<!--[if !IE]><!-->${0}<!--<![endif]-->}"),
    ("ol+", "ol>li"),
    ("ul+", "ul>li"),
    ("dl+", "dl>dt+dd"),
    ("map+", "map>area"),
    ("table+", "table>tr>td"),
    ("colgroup+|colg+", "colgroup>col"),
    ("tr+", "tr>td"),
    ("select+", "select>option"),
    ("optgroup+|optg+", "optgroup>option"),
    ("pic+", "picture>source:srcset+img"),
];

const CSS_SNIPPETS: &[(&str, &str)] = &[
    ("@f", "@font-face {\n\tfont-family: ${1};\n\tsrc: url(${1});\n}"),
    ("@i|@import", "@import url(${0});"),
    ("@kf|@k", "@keyframes ${1:identifier} {\n\t${0}\n}"),
    ("@m|@media", "@media ${1:screen} {\n\t${0}\n}"),
    ("ac", "align-content:flex-start|flex-end|center|space-between|space-around|stretch"),
    ("ai", "align-items:flex-start|flex-end|center|baseline|stretch"),
    ("as", "align-self:auto|flex-start|flex-end|center|baseline|stretch"),
    ("b", "bottom"),
    ("bd", "border:${1:1px} ${2:solid} ${3:#000}"),
    ("bdb", "border-bottom:${1:1px} ${2:solid} ${3:#000}"),
    ("bdc", "border-color:${1:#000}"),
    ("bdrs", "border-radius"),
    ("bdt", "border-top:${1:1px} ${2:solid} ${3:#000}"),
    ("bg", "background:#${1:000}"),
    ("bgc", "background-color:#${1:fff}"),
    ("bgi", "background-image:url(${0})"),
    ("bgp", "background-position"),
    ("bgr", "background-repeat:repeat|repeat-x|repeat-y|no-repeat|space|round"),
    ("bgsz", "background-size:contain|cover"),
    ("bxsh", "box-shadow:${1:inset }${2:hoff} ${3:voff} ${4:blur} ${5:#000}|none"),
    ("bxz", "box-sizing:border-box|content-box"),
    ("c", "color:#${1:000}"),
    ("cl", "clear:both|left|right|none"),
    ("cnt", "content:'${0}'|normal|open-quote|no-open-quote|close-quote|no-close-quote"),
    ("cur", "cursor:pointer|auto|default|crosshair|hand|help|move|text"),
    ("d", "display:block|none|flex|inline-flex|inline|inline-block|grid|inline-grid|table"),
    ("ff", "font-family:serif|sans-serif|cursive|fantasy|monospace"),
    ("fl", "float:left|right|none"),
    ("fs", "font-style:italic|normal|oblique"),
    ("fw", "font-weight:normal|bold|bolder|lighter"),
    ("fx", "flex"),
    ("fxd", "flex-direction:row|row-reverse|column|column-reverse"),
    ("fxw", "flex-wrap:nowrap|wrap|wrap-reverse"),
    ("fz", "font-size"),
    ("gd", "grid"),
    ("gtc", "grid-template-columns:repeat()|minmax()"),
    ("gtr", "grid-template-rows:repeat()|minmax()"),
    ("h", "height"),
    ("jc", "justify-content:flex-start|flex-end|center|space-between|space-around"),
    ("l", "left"),
    ("lg", "background-image:linear-gradient(${1})"),
    ("lh", "line-height"),
    ("lis", "list-style:none"),
    ("lts", "letter-spacing:normal"),
    ("m", "margin"),
    ("mb", "margin-bottom"),
    ("ml", "margin-left"),
    ("mr", "margin-right"),
    ("mt", "margin-top"),
    ("mah", "max-height"),
    ("maw", "max-width"),
    ("mih", "min-height"),
    ("miw", "min-width"),
    ("op", "opacity"),
    ("ov", "overflow:hidden|visible|scroll|auto"),
    ("ovx", "overflow-x:hidden|auto|scroll|visible"),
    ("ovy", "overflow-y:hidden|auto|scroll|visible"),
    ("p", "padding"),
    ("pb", "padding-bottom"),
    ("pl", "padding-left"),
    ("pr", "padding-right"),
    ("pt", "padding-top"),
    ("pos", "position:relative|absolute|fixed|static"),
    ("r", "right"),
    ("t", "top"),
    ("ta", "text-align:left|center|right|justify"),
    ("td", "text-decoration:none|underline|overline|line-through"),
    ("ti", "text-indent"),
    ("trf", "transform"),
    ("trs", "transition:${1:prop} ${2:time}"),
    ("tt", "text-transform:uppercase|lowercase|capitalize|none"),
    ("us", "user-select:none"),
    ("v", "visibility:hidden|visible|collapse"),
    ("va", "vertical-align:top|super|text-top|middle|baseline|bottom|text-bottom|sub"),
    ("w", "width"),
    ("whs|wsp", "white-space:nowrap|pre|pre-wrap|pre-line|normal"),
    ("wob", "word-break:normal|keep-all|break-all"),
    ("z", "z-index"),
    ("!", "!important"),
];

const XSL_SNIPPETS: &[(&str, &str)] = &[
    ("tm|tmatch", "xsl:template[match mode]"),
    ("tn|tname", "xsl:template[name]"),
    ("call", "xsl:call-template[name]"),
    ("ap", "xsl:apply-templates[select mode]"),
    ("api", "xsl:apply-imports"),
    ("imp", "xsl:import[href]"),
    ("inc", "xsl:include[href]"),
    ("ch", "xsl:choose"),
    ("wh|xsl:when", "xsl:when[test]"),
    ("ot", "xsl:otherwise"),
    ("if", "xsl:if[test]"),
    ("par", "xsl:param[name]"),
    ("pare", "xsl:param[name select]"),
    ("var", "xsl:variable[name]"),
    ("vare", "xsl:variable[name select]"),
    ("wp", "xsl:with-param[name select]"),
    ("key", "xsl:key[name match use]"),
    ("elem", "xsl:element[name]"),
    ("attr", "xsl:attribute[name]"),
    ("attrs", "xsl:attribute-set[name]"),
    ("cp", "xsl:copy[select]"),
    ("co", "xsl:copy-of[select]"),
    ("val", "xsl:value-of[select]"),
    ("for|each", "xsl:for-each[select]"),
    ("tex", "xsl:text"),
    ("com", "xsl:comment"),
    ("msg", "xsl:message[terminate=no]"),
    ("fall", "xsl:fallback"),
    ("num", "xsl:number[value]"),
    ("nam", "namespace-alias[stylesheet-prefix result-prefix]"),
    ("pres", "xsl:preserve-space[elements]"),
    ("strip", "xsl:strip-space[elements]"),
    ("proc", "xsl:processing-instruction[name]"),
    ("sort", "xsl:sort[select order]"),
    ("choose", "xsl:choose>xsl:when+xsl:otherwise"),
    (
        "xsl",
        "!!!+xsl:stylesheet[version=1.0 xmlns:xsl=http://www.w3.org/1999/XSL/Transform]>{\n|}",
    ),
    ("!!!", "{<?xml version=\"1.0\" encoding=\"UTF-8\"?>}"),
];

static DEFAULT_TABLES: Lazy<HashMap<&'static str, SnippetLayer>> = Lazy::new(|| {
    HashMap::from([
        ("html", HTML_SNIPPETS.iter().copied().collect()),
        ("css", CSS_SNIPPETS.iter().copied().collect()),
        ("xsl", XSL_SNIPPETS.iter().copied().collect()),
    ])
});

/// Returns a copy of the built-in table registered under `name`.
///
/// # Example
///
/// ```
/// use xabbr::registry::defaults::default_table;
///
/// let html = default_table("html").unwrap();
/// assert_eq!(html.get("bq").and_then(|s| s.as_literal()), Some("blockquote"));
/// assert!(default_table("slim").is_none());
/// ```
pub fn default_table(name: &str) -> Option<SnippetLayer> {
    DEFAULT_TABLES.get(name).cloned()
}

/// Names of all built-in tables, sorted.
pub fn table_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = DEFAULT_TABLES.keys().copied().collect();
    names.sort_unstable();
    names
}

/// Variables available to every abbreviation unless overridden.
pub fn default_variables() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("lang".to_string(), "en".to_string()),
        ("locale".to_string(), "en-US".to_string()),
        ("charset".to_string(), "UTF-8".to_string()),
    ])
}
