mod todo;
mod validation_error;

pub use todo::{
    parse_todo_id, Todo, TodoFields, TodoId, TodoRequest, DESCRIPTION_MAX_LEN, PRIORITY_MAX,
    PRIORITY_MIN, TITLE_MAX_LEN,
};
pub use validation_error::ValidationError;
