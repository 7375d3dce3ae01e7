pub mod constraints;
pub mod extend_info;
pub mod label;
pub mod labelling_algorithm;
pub mod node_list;
pub mod objectives;
pub mod overtime;
pub mod route_evaluator;
pub mod route_evaluator_result;
pub mod search_graph;
