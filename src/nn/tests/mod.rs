mod layer_basic;
mod layer_max_pool2d;
mod save_load;
