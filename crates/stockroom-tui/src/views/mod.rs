pub mod edit;
pub mod home;

pub use edit::{EditPhase, EditView};
pub use home::{Failure, HomeError, HomeView, Phase};

use crate::dispatch::Request;
use crate::route::Route;

/// What a view asks the app to do after handling a key or a response.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Request(Request),
    Navigate(Route),
}
