mod grid;
mod toolbar;
mod view;

pub use view::DashboardPage;
