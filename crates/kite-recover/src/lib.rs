mod report;
mod source;
mod winforms;
mod wpf;

pub use report::{FileDiagnostic, ParseReport};
pub use source::{find_files, read_source};
pub use winforms::{
    parse_code_file, parse_code_source, parse_designer_source,
    parse_winforms_project, DESIGNER_SUFFIX,
};
pub use wpf::{parse_wpf_project, parse_xaml_file, parse_xaml_source, APP_DESCRIPTOR_PREFIX};
