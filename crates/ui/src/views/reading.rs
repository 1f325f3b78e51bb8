mod scripts;
mod view;

pub use view::ReadingView;
#[cfg(test)]
pub(crate) use view::ReadingTestHandles;
