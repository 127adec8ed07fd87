use crate::error::SoleError;

pub(crate) trait Validate {
    fn validate<F: FnOnce(String) -> SoleError>(&self, err: F) -> Result<(), SoleError>;
}
