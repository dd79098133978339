pub mod discovery;
pub mod front_matter;
pub mod post;

pub use discovery::discover_posts;
pub use post::Post;
