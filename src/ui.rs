pub mod panel_window;
