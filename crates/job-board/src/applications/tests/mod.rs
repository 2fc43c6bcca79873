mod routing;
mod tracker;
