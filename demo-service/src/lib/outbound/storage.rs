pub mod disk;
pub mod s3;

pub use disk::DiskFileStore;
pub use s3::S3FileStore;
