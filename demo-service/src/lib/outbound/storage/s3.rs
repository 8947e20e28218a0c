use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;

use crate::domain::files::errors::FileError;
use crate::domain::files::ports::FileStore;

/// File store backed by an S3-compatible bucket. Objects live under a
/// configured key prefix; listing strips the prefix again so callers see
/// flat names.
pub struct S3FileStore {
    client: Client,
    bucket: String,
    prefix: String,
}

impl S3FileStore {
    pub fn new(client: Client, bucket: String, prefix: String) -> Self {
        Self {
            client,
            bucket,
            prefix,
        }
    }

    fn key(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }
}

#[async_trait]
impl FileStore for S3FileStore {
    async fn put(&self, name: &str, bytes: &[u8]) -> Result<String, FileError> {
        let key = self.key(name);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(bytes.to_vec()))
            .send()
            .await
            .map_err(|e| FileError::Storage(format!("S3 PutObject: {}", e)))?;

        tracing::debug!(bucket = %self.bucket, key = %key, bytes = bytes.len(), "Object uploaded");

        Ok(key)
    }

    async fn get(&self, name: &str) -> Result<Option<Vec<u8>>, FileError> {
        let key = self.key(name);

        let resp = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                let service_error = e.into_service_error();
                if service_error.is_no_such_key() {
                    return Ok(None);
                }
                return Err(FileError::Storage(format!(
                    "S3 GetObject: {}",
                    service_error
                )));
            }
        };

        let bytes = resp
            .body
            .collect()
            .await
            .map_err(|e| FileError::Storage(format!("read S3 GetObject body: {}", e)))?
            .into_bytes();

        Ok(Some(bytes.to_vec()))
    }

    async fn list(&self) -> Result<Vec<String>, FileError> {
        let mut names = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let mut req = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(&self.prefix);

            if let Some(ref token) = continuation_token {
                req = req.continuation_token(token);
            }

            let resp = req
                .send()
                .await
                .map_err(|e| FileError::Storage(format!("S3 ListObjectsV2: {}", e)))?;

            for obj in resp.contents() {
                if let Some(key) = obj.key() {
                    if let Some(name) = key.strip_prefix(&self.prefix) {
                        names.push(name.to_string());
                    }
                }
            }

            match resp.next_continuation_token() {
                Some(token) => continuation_token = Some(token.to_string()),
                None => break,
            }
        }

        Ok(names)
    }
}
