mod test_route;
