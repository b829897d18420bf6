// Constants for the style checker

/// Default maximum line length, in characters, after right-trimming
pub const DEFAULT_MAX_LINE_LENGTH: usize = 80;

/// Vim modelines may exceed the line length limit
pub const MODELINE_PREFIX: &str = "/* vim: ";

/// Punctuation that must be surrounded by spaces, besides anything
/// containing `=`
pub const SPACED_OPERATORS: [&str; 6] = ["<", ">", "&&", "||", "?", "{"];

/// Punctuation that must be followed by a space
pub const SPACE_AFTER: [&str; 2] = [",", ":"];

/// Punctuation that must be preceded by a space
pub const SPACE_BEFORE: [&str; 1] = ["}"];

/// Binary operators that should start the continuation line rather than end
/// the broken one.  Assignment is not included.
pub const EOL_OPERATORS: [&str; 17] = [
    "&&", "||", "+", "-", "*", "/", "%", "|", "&", "^", "==", "!=", "<", ">",
    "<=", ">=", "?",
];

/// Boolean literals that should never be compared against
pub const BOOLEAN_LITERALS: [&str; 2] = ["TRUE", "FALSE"];

/// Functions taking `gboolean` arguments, with 1-based argument positions
pub const BOOLEAN_ARGUMENT_FUNCTIONS: [(&str, &[usize]); 12] = [
    ("g_array_new", &[1, 2]),
    ("g_array_sized_new", &[1, 2]),
    ("g_array_free", &[2]),
    ("g_ptr_array_free", &[2]),
    ("g_string_free", &[2]),
    ("gtk_hbox_new", &[1]),
    ("gtk_vbox_new", &[1]),
    ("gdk_draw_rectangle", &[3]),
    ("gtk_box_pack_start", &[3, 4]),
    ("gwy_data_field_new", &[5]),
    ("gwy_data_line_new", &[3]),
    ("gwy_data_field_invert", &[2, 3, 4]),
];
