mod browser;
mod details;
mod panels;
