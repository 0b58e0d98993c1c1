//! BSON element type tags.

pub const TYPE_NUMBER: u8 = 0x01;
pub const TYPE_STRING: u8 = 0x02;
pub const TYPE_OBJECT: u8 = 0x03;
pub const TYPE_ARRAY: u8 = 0x04;
pub const TYPE_BINARY: u8 = 0x05;
pub const TYPE_UNDEFINED: u8 = 0x06;
pub const TYPE_OID: u8 = 0x07;
pub const TYPE_BOOLEAN: u8 = 0x08;
pub const TYPE_DATE: u8 = 0x09;
pub const TYPE_NULL: u8 = 0x0a;
pub const TYPE_REGEXP: u8 = 0x0b;
pub const TYPE_DBPOINTER: u8 = 0x0c;
pub const TYPE_CODE: u8 = 0x0d;
pub const TYPE_SYMBOL: u8 = 0x0e;
pub const TYPE_CODE_W_SCOPE: u8 = 0x0f;
pub const TYPE_INT: u8 = 0x10;
pub const TYPE_TIMESTAMP: u8 = 0x11;
pub const TYPE_LONG: u8 = 0x12;
pub const TYPE_DECIMAL128: u8 = 0x13;
pub const TYPE_MIN_KEY: u8 = 0xff;
pub const TYPE_MAX_KEY: u8 = 0x7f;
