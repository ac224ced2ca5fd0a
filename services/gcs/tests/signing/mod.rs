mod presigned;
mod standard;
