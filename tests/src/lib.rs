//! End-to-end hunts across scripted fleets.

#[cfg(test)]
mod utils;

#[cfg(test)]
mod locate;
