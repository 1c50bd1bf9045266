mod stateful_list;

pub use stateful_list::StatefulList;
