pub(crate) mod decrypt;
pub(crate) mod encrypt;
pub(crate) mod import;
pub(crate) mod keys;
pub(crate) mod sign;
pub(crate) mod verify;
