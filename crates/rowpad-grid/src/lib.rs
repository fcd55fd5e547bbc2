// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod column;
pub mod controller;
pub mod ids;
pub mod intent;
pub mod store;
pub mod value;

pub use column::*;
pub use controller::*;
pub use ids::*;
pub use intent::*;
pub use store::*;
pub use value::*;
