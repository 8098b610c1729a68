pub mod app;
pub mod aws;
pub mod cli;
pub mod command;
pub mod config;
pub mod discovery;
pub mod env_file;
pub mod error;
pub mod event;
pub mod kube;
pub mod menu;
pub mod shell;
pub mod snapshot;
pub mod terminal;
pub mod theme;
pub mod ui;
