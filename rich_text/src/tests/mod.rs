// Copyright 2025 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod test_layout;
mod test_store;
mod utils;
