mod query_class;
mod record_type;
mod response_code;

pub use query_class::QueryClass;
pub use record_type::RecordType;
pub use response_code::ResponseCode;
