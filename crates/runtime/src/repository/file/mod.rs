mod state;

pub use state::FileStateRepository;
