mod all;
mod footer;
mod log;
mod task_form;

use self::log::log;
use super::*;
use footer::footer;
use task_form::task_form;

pub use all::all as render;
