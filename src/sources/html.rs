//! Small structural helpers over the HTML tables of the archival documents.
use std::sync::LazyLock;

use itertools::Itertools;
use regex::Regex;

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("static regex"));

static ROW_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<tr\b[^>]*>").expect("static regex"));

static CELL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<td\b[^>]*>(.*?)</td>").expect("static regex"));

static S_DESIGNATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(S/\d{4} [A-Z])(\d+)$").expect("static regex"));

/// Decode the few entities used by the tables.
fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&#177;", "±")
        .replace("&plusmn;", "±")
        .replace("&#8211;", "-")
        .replace("&minus;", "-")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Visible text of an HTML fragment: tags removed, entities decoded, whitespace runs
/// collapsed into single spaces.
pub(crate) fn text(fragment: &str) -> String {
    let stripped = TAG.replace_all(fragment, " ");
    decode_entities(&stripped).split_whitespace().join(" ")
}

/// Split a table into the raw HTML of its rows.
///
/// Rows are delimited by their opening `<tr>` tag, so rows missing their closing tag are
/// still separated correctly. The content before the first row is dropped.
pub(crate) fn rows(table: &str) -> Vec<&str> {
    let starts: Vec<usize> = ROW_START.find_iter(table).map(|m| m.end()).collect();
    let ends = ROW_START
        .find_iter(table)
        .skip(1)
        .map(|m| m.start())
        .chain(std::iter::once(table.len()));
    starts
        .iter()
        .zip(ends)
        .map(|(start, end)| &table[*start..end])
        .collect()
}

/// Visible text of the data cells (`<td>`) of a row; header cells are ignored.
pub(crate) fn cells(row: &str) -> Vec<String> {
    CELL.captures_iter(row).map(|c| text(&c[1])).collect()
}

/// Canonical satellite name: visible text with a provisional designation such as
/// `S/2003 J1` rejoined as `S/2003 J 1`.
pub(crate) fn satellite_name(raw: &str) -> String {
    let name = text(raw);
    match S_DESIGNATION.captures(&name) {
        Some(c) => format!("{} {}", &c[1], &c[2]),
        None => name,
    }
}

#[cfg(test)]
mod html_test {
    use super::*;

    #[test]
    fn test_text() {
        assert_eq!(text("<b>Io</b>&nbsp;\n  (J1)"), "Io (J1)");
        assert_eq!(text("5959.916&#177;0.012"), "5959.916±0.012");
    }

    #[test]
    fn test_rows_without_closing_tags() {
        let table = "<TABLE><TR><TH>Name</TH><TR ALIGN=right><TD>Io</TD><TD>1</TD>\n\
                     <TR ALIGN=right><TD>Europa</TD><TD>2</TD></TR></TABLE>";
        let rows = rows(table);
        assert_eq!(rows.len(), 3);
        assert!(cells(rows[0]).is_empty());
        assert_eq!(cells(rows[1]), vec!["Io", "1"]);
        assert_eq!(cells(rows[2]), vec!["Europa", "2"]);
    }

    #[test]
    fn test_satellite_name() {
        assert_eq!(satellite_name("S/2003 J1"), "S/2003 J 1");
        assert_eq!(satellite_name(" S/2003\n   J12 "), "S/2003 J 12");
        assert_eq!(satellite_name("S/2003 J 1"), "S/2003 J 1");
        assert_eq!(satellite_name("<a href=\"x\">Io</a>"), "Io");
        assert_eq!(satellite_name("S/2003 J"), "S/2003 J");
    }
}
