//! Menu catalog: repositories and the admin editor

pub mod editor;
pub mod repository;

pub use editor::{MenuEditor, PersistHandle};
pub use repository::{
    BaseRepository, BusinessRepository, CategoryRepository, ProductRepository, TagRepository,
};
