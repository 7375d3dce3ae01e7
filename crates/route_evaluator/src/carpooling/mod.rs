pub mod time_window_propagation;
