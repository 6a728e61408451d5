//! Tab-budget alignment for multi-field declarations.
//!
//! A declaration such as `input [7:0] data_i` is written as tab-separated
//! fields, with extra tabs in front of the last field so that it starts at a
//! configured column whenever the preceding fields leave room for it.

use serde::{Deserialize, Serialize};

/// Tab width and the column the last field of a declaration should start at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indent {
    pub tab_width: usize,
    pub indent_column: usize,
}

impl Indent {
    pub const DEFAULT_TAB_WIDTH: usize = 4;
    pub const DEFAULT_INDENT_COLUMN: usize = 24;

    /// A zero tab width is treated as 1.
    pub fn new(tab_width: usize, indent_column: usize) -> Self {
        Self {
            tab_width: tab_width.max(1),
            indent_column,
        }
    }

    /// Number of tab stops the last field should be indented by.
    pub fn desired_tab_count(&self) -> usize {
        self.indent_column / self.tab_width
    }

    /// Tab stops a non-final field occupies including its separator tab.
    fn field_cost(&self, field: &str) -> usize {
        field.len() / self.tab_width + 1
    }

    pub fn align<S: AsRef<str>>(&self, fields: &[S]) -> String {
        align(fields, self.tab_width, self.indent_column)
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TAB_WIDTH, Self::DEFAULT_INDENT_COLUMN)
    }
}

/// Join `fields` with single tabs, padding in front of the last field with as
/// many extra tabs as the budget `indent_column / tab_width` leaves over.
///
/// When the leading fields already exceed the budget no extra tabs are added;
/// the result is then merely misaligned.
pub fn align<S: AsRef<str>>(fields: &[S], tab_width: usize, indent_column: usize) -> String {
    let indent = Indent::new(tab_width, indent_column);

    let Some((last, leading)) = fields.split_last() else {
        return String::new();
    };

    let used: usize = leading
        .iter()
        .map(|field| indent.field_cost(field.as_ref()))
        .sum();
    let extra_tabs = indent.desired_tab_count().saturating_sub(used);

    let mut result = String::new();
    for field in leading {
        result.push_str(field.as_ref());
        result.push('\t');
    }
    if !leading.is_empty() {
        result.extend(std::iter::repeat('\t').take(extra_tabs));
    }
    result.push_str(last.as_ref());
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Column (in characters) where the last field starts once tabs expand.
    fn last_field_column(aligned: &str, tab_width: usize) -> usize {
        let last_tab = aligned.rfind('\t').map(|i| i + 1).unwrap_or(0);
        let mut column = 0;
        for c in aligned[..last_tab].chars() {
            if c == '\t' {
                column = (column / tab_width + 1) * tab_width;
            } else {
                column += 1;
            }
        }
        column
    }

    #[test]
    fn test_two_fields_reach_target_column() {
        let aligned = align(&["input", "data_i"], 4, 24);
        assert_eq!(aligned, "input\t\t\t\t\tdata_i");
        assert_eq!(last_field_column(&aligned, 4), 24);
    }

    #[test]
    fn test_three_fields_reach_target_column() {
        let aligned = align(&["output", "[7:0]", "data_o"], 4, 24);
        assert_eq!(aligned, "output\t[7:0]\t\t\tdata_o");
        assert_eq!(last_field_column(&aligned, 4), 24);
    }

    #[test]
    fn test_overlong_fields_keep_single_separator() {
        let aligned = align(&["input", "[ADDRESS_WIDTH*NUM_CHANNELS-1:0]", "addr"], 4, 8);
        assert_eq!(aligned, "input\t[ADDRESS_WIDTH*NUM_CHANNELS-1:0]\taddr");
    }

    #[test]
    fn test_single_field_is_returned_unchanged() {
        assert_eq!(align(&["clk"], 4, 24), "clk");
        assert_eq!(align::<&str>(&[], 4, 24), "");
    }

    #[test]
    fn test_field_length_multiple_of_tab_width() {
        // "wire" fills a whole tab stop, so its separator starts the next one
        let aligned = align(&["wire", "x"], 4, 16);
        assert_eq!(aligned, "wire\t\t\tx");
        assert_eq!(last_field_column(&aligned, 4), 16);
    }

    #[test]
    fn test_indent_helper_matches_free_function() {
        let indent = Indent::new(8, 32);
        assert_eq!(
            indent.align(&["inout", "pad"]),
            align(&["inout", "pad"], 8, 32)
        );
        assert_eq!(indent.desired_tab_count(), 4);
    }

    #[test]
    fn test_zero_tab_width_is_clamped() {
        assert_eq!(Indent::new(0, 3).tab_width, 1);
        assert_eq!(align(&["a", "b"], 0, 3), "a\t\tb");
    }
}
