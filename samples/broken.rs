fn main() {
    let total = [1, 2, 3].iter().sum::<i32>(;
    println!("{}", total);
}
