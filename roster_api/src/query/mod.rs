mod common;
pub use self::common::{Query, QueryCommon, SortDirection};

mod list;
pub use self::list::ListQuery;
