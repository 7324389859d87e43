use lsl::Builder;

fn main() {
  let mut set = Builder::new()
    .with_probability(0.6)
    .with_comparator(f64::total_cmp)
    .build_set::<f64>()
    .expect("0.6 is a valid promotion probability");

  for k in [9.0, 7.0, 6.0, 1.0, 3.0] {
    set.insert(k);
  }

  println!("{}", set.sketch());
  println!("{:?}", set);
  println!("size: {}", set.len());
}
