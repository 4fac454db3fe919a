mod article;
mod layout;

pub use article::{AnnotatedArticle, Article, IngestedDateError, LAYOUT_FIELD};
pub use layout::Layout;
