pub mod config_form;
pub mod stream_panel;
