//! Toolbar-wide behaviour checks over every control and flag combination.

mod scenarios;
