mod meta;
pub use self::meta::{Meta, PaginatedResponse, Paging, Response};

mod resource;
pub use self::resource::Resource;
