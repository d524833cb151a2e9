// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod completer;
pub mod form;
pub mod model;

pub use completer::*;
pub use form::*;
pub use model::*;
