pub mod availability_grid;
pub mod category_bar;
pub mod palette;
