mod tests_neo4j_client;
mod tests_neo4jconfig;
