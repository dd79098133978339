pub mod admonitions;
pub mod headings;
pub mod highlight;
pub mod snippets;
