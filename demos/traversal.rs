use balanced_tree::{AvlTree, RbTree, Tree};
use log::info;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

fn show<T>(name: &str, tree: &T)
where
    T: Tree,
    T::Key: std::fmt::Display,
{
    let join = |keys: Vec<String>| keys.join(" ");
    let pre: Vec<String> = balanced_tree::PreOrder::new(tree).map(ToString::to_string).collect();
    let ino: Vec<String> = balanced_tree::InOrder::new(tree).map(ToString::to_string).collect();
    let post: Vec<String> = balanced_tree::PostOrder::new(tree).map(ToString::to_string).collect();
    println!("{name}");
    println!("  pre-order:  {}", join(pre));
    println!("  in-order:   {}", join(ino));
    println!("  post-order: {}", join(post));
}

fn main() {
    // Rotations and recolorings are logged at trace level.
    TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .expect("logger is installed once");

    let mut avl = AvlTree::new();
    for k in [26, 21, 30, 50, 60, 66, 68, 70] {
        info!("avl insert {k}");
        avl.insert(k);
    }
    show("avl", &avl);

    let mut rb = RbTree::new();
    for k in [3, 5, 8, 7, 15, 19, 18, 30, 33] {
        info!("rb insert {k}");
        rb.insert(k);
    }
    show("red-black", &rb);
    if let Some(color) = rb.root_color() {
        println!("  root color: {color:?}");
    }
}
