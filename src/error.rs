use thiserror::Error;

pub type Result<T> = std::result::Result<T, HeatError>;

#[derive(Error, Debug)]
pub enum HeatError {
    #[error("Git error: {0}")]
    Git(#[from] Box<gix::open::Error>),
    #[error("Git repository error: {0}")]
    GitRepo(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Render error: {0}")]
    Render(String),
    #[error("Invalid author pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("Repository {name}: {source}")]
    Repository {
        name: String,
        source: Box<HeatError>,
    },
    #[error("Object find error: {0}")]
    ObjectFind(#[from] Box<gix::object::find::existing::Error>),
    #[error("Object find with conversion error: {0}")]
    ObjectFindConv(#[from] Box<gix::object::find::existing::with_conversion::Error>),
    #[error("Object decode error: {0}")]
    ObjectDecode(#[from] Box<gix::objs::decode::Error>),
    #[error("Commit error: {0}")]
    Commit(#[from] Box<gix::object::commit::Error>),
}

// Manual From implementations for unboxed to boxed conversions
impl From<gix::open::Error> for HeatError {
    fn from(err: gix::open::Error) -> Self {
        HeatError::Git(Box::new(err))
    }
}

impl From<gix::object::find::existing::Error> for HeatError {
    fn from(err: gix::object::find::existing::Error) -> Self {
        HeatError::ObjectFind(Box::new(err))
    }
}

impl From<gix::object::find::existing::with_conversion::Error> for HeatError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        HeatError::ObjectFindConv(Box::new(err))
    }
}

impl From<gix::objs::decode::Error> for HeatError {
    fn from(err: gix::objs::decode::Error) -> Self {
        HeatError::ObjectDecode(Box::new(err))
    }
}

impl From<gix::object::commit::Error> for HeatError {
    fn from(err: gix::object::commit::Error) -> Self {
        HeatError::Commit(Box::new(err))
    }
}
