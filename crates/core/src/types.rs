/// Backend primary keys are integer row ids.
pub type DbId = i64;
