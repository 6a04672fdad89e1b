// CProbe
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Rewrite passes, listed in pipeline order

pub mod constant_folding;
pub mod dead_code;
pub mod hoisting;
pub mod identity;
pub mod strength_reduction;

// Re-export main types for convenience
pub use constant_folding::ConstantFolder;
pub use dead_code::DeadCodeEliminator;
pub use hoisting::DeclarationHoister;
pub use identity::IdentityEliminator;
pub use strength_reduction::StrengthReducer;
